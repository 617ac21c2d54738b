use super::*;
use crate::field::spec::FieldSpec;

const CANVAS: Canvas = Canvas {
    width: 640,
    height: 360,
};

fn relative() -> Vec<FieldSpec> {
    vec![FieldSpec::affine("spd", 0.2, 0.5)]
}

fn absolute() -> Vec<FieldSpec> {
    vec![FieldSpec::canvas_x("x"), FieldSpec::canvas_y("y")]
}

#[test]
fn repeated_requests_share_one_field() {
    let cache = FieldCache::new();
    let a = cache.get_or_generate(8, "s", &relative(), CANVAS);
    let b = cache.get_or_generate(8, "s", &relative(), CANVAS);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.len(), 1);
}

#[test]
fn key_changes_trigger_regeneration() {
    let cache = FieldCache::new();
    let a = cache.get_or_generate(8, "s", &relative(), CANVAS);
    let b = cache.get_or_generate(8, "s2", &relative(), CANVAS);
    let c = cache.get_or_generate(9, "s", &relative(), CANVAS);
    assert_ne!(*a, *b);
    assert_eq!(c.len(), 9);
    assert_eq!(cache.len(), 3);
}

#[test]
fn canvas_only_matters_for_absolute_fields() {
    let other = Canvas {
        width: 1920,
        height: 1080,
    };
    assert_eq!(
        FieldKey::new(4, "s", &relative(), CANVAS),
        FieldKey::new(4, "s", &relative(), other)
    );
    assert_ne!(
        FieldKey::new(4, "s", &absolute(), CANVAS),
        FieldKey::new(4, "s", &absolute(), other)
    );
}

#[test]
fn cached_values_equal_fresh_generation() {
    let cache = FieldCache::new();
    let cached = cache.get_or_generate(5, "s", &absolute(), CANVAS);
    let fresh = EntityField::generate(5, "s", &absolute(), CANVAS);
    assert_eq!(*cached, fresh);
}

#[test]
fn concurrent_misses_converge_on_equal_values() {
    let cache = Arc::new(FieldCache::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get_or_generate(32, "race", &relative(), CANVAS))
        })
        .collect();
    let fields: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    for f in &fields[1..] {
        assert_eq!(**f, *fields[0]);
    }
    assert_eq!(cache.len(), 1);
}

#[test]
fn cache_is_bounded_and_clearable() {
    let cache = FieldCache::new();
    for i in 0..(MAX_ENTRIES + 3) {
        cache.get_or_generate(2, &format!("seed{i}"), &relative(), CANVAS);
    }
    assert!(cache.len() <= MAX_ENTRIES);
    cache.clear();
    assert!(cache.is_empty());
}
