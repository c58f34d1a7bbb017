use log::LevelFilter;
use std::sync::OnceLock;
use taglog::Config;
use taglog::TagLogger;

#[test]
fn test_debug() {
    static TAG_LOGGER: OnceLock<TagLogger> = OnceLock::new();
    let tag_logger = TAG_LOGGER
        .get_or_init(|| TagLogger::new(Config::default().with_max_level(LevelFilter::Trace)));
    assert!(format!("{:?}", tag_logger).starts_with("TagLogger"));
}
