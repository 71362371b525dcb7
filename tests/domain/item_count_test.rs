use quizzybee::domain::ItemCount;

#[test]
fn given_boundaries_when_clamping_then_kept_as_is() {
    assert_eq!(ItemCount::clamped(1).get(), 1);
    assert_eq!(ItemCount::clamped(20).get(), 20);
}

#[test]
fn given_out_of_range_values_when_clamping_then_pinned_to_bounds() {
    assert_eq!(ItemCount::clamped(0).get(), ItemCount::MIN);
    assert_eq!(ItemCount::clamped(-7).get(), ItemCount::MIN);
    assert_eq!(ItemCount::clamped(21).get(), ItemCount::MAX);
    assert_eq!(ItemCount::clamped(i64::MAX).get(), ItemCount::MAX);
}

#[test]
fn given_default_when_created_then_five() {
    assert_eq!(ItemCount::default().get(), 5);
}

#[test]
fn given_json_number_when_deserializing_then_clamped() {
    let count: ItemCount = serde_json::from_str("99").unwrap();
    assert_eq!(count.get(), 20);

    assert_eq!(serde_json::to_string(&ItemCount::clamped(7)).unwrap(), "7");
}
