use log::LevelFilter;
use taglog::FilterBuilder;

#[test]
fn config_log_level() {
    taglog::init_once(
        taglog::Config::default().with_filter(
            FilterBuilder::new()
                .filter_level(LevelFilter::Trace)
                .build(),
        ),
    );

    // The filter's own ceiling is mirrored into the `log` crate.
    assert_eq!(log::max_level(), log::LevelFilter::Trace);
}
