//! Integration tests for configuration loading and crawler assembly

mod common;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use common::site;
use tempfile::NamedTempFile;
use wordcrawl::config::{CrawlConfig, CrawlerKind};
use wordcrawl::crawler::build_crawler;
use wordcrawl::parser::{PageParser, SiteGraphParser, PAGE_PARSER};
use wordcrawl::profiler::Profiler;
use wordcrawl::utils::clock::{Clock, SystemClock};

const JSON_CONFIG: &str = r#"{
  "startPages": ["http://site.test/"],
  "ignoredUrls": [".*\\.pdf"],
  "ignoredWords": ["^.{1,2}$"],
  "parallelism": 2,
  "implementationOverride": "sequential",
  "maxDepth": 3,
  "timeoutSeconds": 5,
  "popularWordCount": 4,
  "profileOutputPath": "profile.txt",
  "resultPath": "result.json"
}"#;

const TOML_CONFIG: &str = r#"
startPages = ["http://site.test/"]
ignoredUrls = [".*\\.pdf"]
ignoredWords = ["^.{1,2}$"]
parallelism = 2
implementationOverride = "sequential"
maxDepth = 3
timeoutSeconds = 5
popularWordCount = 4
profileOutputPath = "profile.txt"
resultPath = "result.json"
"#;

fn config_file(suffix: &str, content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_load_json_config() {
    let file = config_file(".json", JSON_CONFIG);
    let config = CrawlConfig::from_file(file.path()).unwrap();

    assert_eq!(config.start_pages, vec!["http://site.test/".to_string()]);
    assert_eq!(config.parallelism(), 2);
    assert_eq!(config.implementation(), CrawlerKind::Sequential);
    assert_eq!(config.max_depth, 3);
    assert_eq!(config.timeout_seconds, 5);
    assert_eq!(config.popular_word_count, 4);
    assert_eq!(config.profile_output_path, Some(PathBuf::from("profile.txt")));
    assert_eq!(config.result_path, Some(PathBuf::from("result.json")));
    assert!(config.validate().is_ok());
}

#[test]
fn test_toml_and_json_agree() {
    let json = config_file(".json", JSON_CONFIG);
    let toml = config_file(".toml", TOML_CONFIG);

    assert_eq!(
        CrawlConfig::from_file(json.path()).unwrap(),
        CrawlConfig::from_file(toml.path()).unwrap()
    );
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = CrawlConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_malformed_file_names_the_path() {
    let file = config_file(".json", "{ not json");
    let err = CrawlConfig::from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("Failed to parse JSON config file"));
}

#[test]
fn test_bad_url_pattern_fails_validation() {
    let config = CrawlConfig {
        ignored_urls: vec!["*.pdf".to_string()],
        ..CrawlConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("ignoredUrls"));
}

#[tokio::test]
async fn test_configured_crawl_end_to_end() {
    let file = config_file(".json", JSON_CONFIG);
    let config = CrawlConfig::from_file(file.path()).unwrap();

    let graph = site(&[
        (
            "http://site.test/",
            "Rust crawlers are fun to write in Rust",
            &["/docs", "/manual.pdf"],
        ),
        ("http://site.test/docs", "crawlers crawl pages", &["/"]),
        ("http://site.test/manual.pdf", "should never be read", &[]),
    ]);

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let profiler = Profiler::new(Arc::clone(&clock));
    let parser = SiteGraphParser::new(graph)
        .with_ignored_words(&config.ignored_words)
        .unwrap();
    let parser: Arc<dyn PageParser> = Arc::new(profiler.wrap(&PAGE_PARSER, parser).unwrap());

    let crawler = build_crawler(&config, clock, parser, &profiler).unwrap();
    assert_eq!(crawler.max_parallelism(), 1);

    let result = crawler.crawl(&config.start_pages).await.unwrap();
    assert_eq!(result.urls_visited, 2);
    assert_eq!(
        result.word_counts,
        vec![
            ("crawlers".to_string(), 2),
            ("rust".to_string(), 2),
            ("crawl".to_string(), 1),
            ("pages".to_string(), 1),
        ]
    );
    assert_eq!(result.count_of("never"), None);

    let report = profiler.render();
    assert!(report.contains("SequentialCrawler#crawl"));
    assert!(report.contains("SiteGraphParser#parse"));
}
