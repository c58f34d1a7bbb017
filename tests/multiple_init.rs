use log::LevelFilter;

#[test]
fn multiple_init() {
    taglog::init_once(taglog::Config::default().with_max_level(LevelFilter::Trace));

    // Second initialization should be silently ignored
    taglog::init_once(taglog::Config::default().with_max_level(LevelFilter::Error));

    assert_eq!(log::max_level(), LevelFilter::Trace);
}
