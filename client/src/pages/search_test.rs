use super::*;

fn with_disability(value: Option<&str>) -> PersonRecord {
    PersonRecord { id: "1".to_owned(), disability_type: value.map(str::to_owned), ..PersonRecord::default() }
}

#[test]
fn only_the_combined_list_offers_category_filters() {
    assert_eq!(category_choices(SearchKind::All).len(), 4);
    assert!(category_choices(SearchKind::Children).is_empty());
}

#[test]
fn disability_options_are_distinct_and_sorted() {
    let records = vec![
        with_disability(Some("Visual")),
        with_disability(Some(" Autism ")),
        with_disability(None),
        with_disability(Some("Visual")),
        with_disability(Some("  ")),
    ];
    assert_eq!(disability_options(&records), vec!["Autism".to_owned(), "Visual".to_owned()]);
}

#[test]
fn toggling_categories_edits_the_set() {
    let mut filter = ListFilter::default();
    toggle_category(&mut filter, Category::Child, true);
    toggle_category(&mut filter, Category::Man, true);
    toggle_category(&mut filter, Category::Child, false);
    assert_eq!(filter.categories.into_iter().collect::<Vec<_>>(), vec![Category::Man]);
}
