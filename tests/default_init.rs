#[test]
fn default_init() {
    taglog::init_once(Default::default());

    // With no configured ceiling everything is passed down to the
    // dispatcher, so the `log` macros must not filter anything out.
    assert_eq!(log::max_level(), log::LevelFilter::Trace);
}
