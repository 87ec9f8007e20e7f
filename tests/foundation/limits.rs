//! Integration tests for Limits configuration

use underbar_foundation::Limits;

#[test]
fn builder_chains() {
    let limits = Limits::default()
        .with_max_flatten_depth(4)
        .with_max_memo_entries(10);
    assert_eq!(limits.max_flatten_depth, 4);
    assert_eq!(limits.max_memo_entries, Some(10));

    let unbounded = limits.with_unbounded_memo();
    assert_eq!(unbounded.max_memo_entries, None);
}
