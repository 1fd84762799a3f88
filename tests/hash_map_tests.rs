//! Integration tests for `HashMap` growth, hashing and diagnostics.

use mapkit::map::{HashMap, HashMapConfig, Map, SortedArrayMap, TreeMap};
use mapkit::sequence::DynamicSequence;
use rstest::{fixture, rstest};
use std::io;
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

// =============================================================================
// Auto Traits
// =============================================================================

static_assertions::assert_impl_all!(DynamicSequence<String>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(SortedArrayMap<String, i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(TreeMap<String, i32>: Send, Sync, Clone, Default);
static_assertions::assert_impl_all!(HashMap<String, i32>: Send, Sync, Clone, Default);
static_assertions::assert_not_impl_any!(TreeMap<Rc<i32>, i32>: Send, Sync);
static_assertions::assert_not_impl_any!(HashMap<i32, Rc<i32>>: Send, Sync);

// =============================================================================
// Log Capture
// =============================================================================

/// Collects formatted events so tests can look for them.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl CapturedLog {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLog {
    fn write(&mut self, buffer: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buffer);
        Ok(buffer.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'writer> MakeWriter<'writer> for CapturedLog {
    type Writer = Self;

    fn make_writer(&'writer self) -> Self::Writer {
        self.clone()
    }
}

fn with_captured_debug_log<F: FnOnce()>(body: F) -> String {
    let log = CapturedLog::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(log.clone())
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, body);
    log.contents()
}

// =============================================================================
// Fixtures
// =============================================================================

#[fixture]
fn words() -> Vec<String> {
    (0..200).map(|index| format!("word-{index:03}")).collect()
}

// =============================================================================
// Growth
// =============================================================================

#[rstest]
#[case(0, 16)]
#[case(9, 16)]
#[case(10, 32)]
#[case(19, 32)]
#[case(20, 64)]
#[case(38, 64)]
#[case(39, 128)]
#[case(200, 512)]
fn test_capacity_after_unique_inserts(
    words: Vec<String>,
    #[case] count: usize,
    #[case] capacity: usize,
) {
    let mut map: HashMap<String, usize> = HashMap::new();
    for (index, word) in words.iter().take(count).enumerate() {
        map.insert(word.clone(), index);
    }
    assert_eq!(map.len(), count);
    assert_eq!(map.capacity(), capacity);
    assert!(map.load_factor() < 0.60);
    for (index, word) in words.iter().take(count).enumerate() {
        assert_eq!(map.at(word), Ok(&index));
    }
}

#[rstest]
fn test_growth_is_logged() {
    let output = with_captured_debug_log(|| {
        let mut map: HashMap<u32, u32> = HashMap::new();
        for key in 0..10 {
            map.insert(key, key);
        }
    });
    assert!(output.contains("grew hash table"), "log was: {output}");
    assert!(output.contains("from=16"), "log was: {output}");
    assert!(output.contains("to=32"), "log was: {output}");
}

#[rstest]
fn test_no_growth_no_log() {
    let output = with_captured_debug_log(|| {
        let mut map: HashMap<u32, u32> = HashMap::new();
        for key in 0..9 {
            map.insert(key, key);
        }
    });
    assert!(!output.contains("grew hash table"), "log was: {output}");
}

#[rstest]
fn test_config_from_large_initial_capacity() {
    let config = HashMapConfig::default().with_initial_capacity(1024);
    let mut map: HashMap<u32, u32> = HashMap::with_config(config).unwrap();
    for key in 0..600 {
        map.insert(key, key);
    }
    assert_eq!(map.capacity(), 1024);
    assert_eq!(map.config(), &config);
}

// =============================================================================
// Shadowing
// =============================================================================

#[rstest]
fn test_duplicate_insert_through_contract() {
    fn insert_twice<M: Map<&'static str, i32>>(map: &mut M) {
        map.insert("k", 1);
        map.insert("k", 2);
    }

    let mut map: HashMap<&str, i32> = HashMap::new();
    insert_twice(&mut map);
    assert_eq!(map.len(), 2);
    assert_eq!(map.at(&"k"), Ok(&2));
    assert_eq!(map.sorted_keys().as_slice(), &["k", "k"]);
    assert_eq!(map.erase(&"k"), Ok(2));
    assert_eq!(map.at(&"k"), Ok(&1));
}

// =============================================================================
// Diagnostics
// =============================================================================

#[rstest]
fn test_diagnostics_on_empty_table() {
    let map: HashMap<String, i32> = HashMap::new();
    assert_eq!(map.min_chain_length(), 0);
    assert_eq!(map.max_chain_length(), 0);
    assert!(map.avg_chain_length().abs() < f64::EPSILON);
}

#[rstest]
fn test_diagnostics_are_consistent(words: Vec<String>) {
    let map: HashMap<String, usize> = words
        .into_iter()
        .enumerate()
        .map(|(index, word)| (word, index))
        .collect();

    let min = map.min_chain_length();
    let max = map.max_chain_length();
    let average = map.avg_chain_length();
    assert!(min >= 1);
    assert!(min <= max);
    #[allow(clippy::cast_precision_loss)]
    let (min, max) = (min as f64, max as f64);
    assert!(min <= average && average <= max);
}

#[rstest]
fn test_diagnostics_after_erasing_everything(words: Vec<String>) {
    let mut map: HashMap<String, usize> = HashMap::new();
    for (index, word) in words.iter().enumerate() {
        map.insert(word.clone(), index);
    }
    for word in &words {
        assert!(map.erase(word).is_ok());
    }
    assert!(map.is_empty());
    assert_eq!(map.capacity(), 512);
    assert_eq!(map.max_chain_length(), 0);
    assert_eq!(map.min_chain_length(), 0);
}

// =============================================================================
// Hashers
// =============================================================================

#[rstest]
fn test_with_std_random_state() {
    let mut map = HashMap::with_hasher(std::collections::hash_map::RandomState::new());
    for key in 0..100_u64 {
        map.insert(key, key * key);
    }
    assert_eq!(map.at(&12), Ok(&144));
    assert_eq!(map.sorted_keys().len(), 100);
}

#[cfg(feature = "fxhash")]
#[rstest]
fn test_with_fx_hasher() {
    let mut map = HashMap::with_hasher(rustc_hash::FxBuildHasher);
    map.insert("fx", 1);
    assert_eq!(map.at(&"fx"), Ok(&1));
}

#[cfg(feature = "ahash")]
#[rstest]
fn test_with_ahash() {
    let mut map = HashMap::with_hasher(ahash::RandomState::new());
    map.insert("ahash", 1);
    assert_eq!(map.at(&"ahash"), Ok(&1));
}

// =============================================================================
// Ownership
// =============================================================================

#[rstest]
fn test_take_moves_every_pair(words: Vec<String>) {
    let mut source: HashMap<String, usize> = HashMap::new();
    for (index, word) in words.iter().enumerate() {
        source.insert(word.clone(), index);
    }
    let moved = source.take();
    assert!(source.is_empty());
    assert_eq!(source.capacity(), 16);
    assert_eq!(moved.len(), words.len());
    assert_eq!(moved.at(&words[42]), Ok(&42));
}

#[rstest]
fn test_single_long_chain() {
    // A constant hasher puts every pair in one chain.
    #[derive(Default, Clone)]
    struct Constant;
    impl std::hash::BuildHasher for Constant {
        type Hasher = std::collections::hash_map::DefaultHasher;
        fn build_hasher(&self) -> Self::Hasher {
            Self::Hasher::default()
        }
    }
    #[derive(Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
    struct Same;

    let config = HashMapConfig::default().with_load_factor_threshold(f64::MAX);
    let mut map = HashMap::with_config_and_hasher(config, Constant).unwrap();
    for value in 0..1000 {
        map.insert(Same, value);
    }
    assert_eq!(map.capacity(), 16);
    assert_eq!(map.max_chain_length(), 1000);
    assert_eq!(map.min_chain_length(), 1000);
    assert_eq!(map.at(&Same), Ok(&999));
}
