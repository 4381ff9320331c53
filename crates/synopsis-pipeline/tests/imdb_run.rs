use std::time::Duration;

use synopsis_acquire::{FetchConfig, ImdbClient};
use synopsis_pipeline::{report, run, RunOptions};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn title_page(summary: &str) -> String {
    format!(
        r#"<html><body>
        <div class="plot_summary">
            <div class="summary_text">
                {summary}
            </div>
        </div>
        </body></html>"#
    )
}

#[tokio::test]
async fn test_end_to_end_against_mock_site() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/title/tt0114709"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page(
            "A cowboy doll is profoundly threatened and jealous when a new spaceman figure supplants him as top toy in a boy's room.",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0113497"))
        .respond_with(ResponseTemplate::new(200).set_body_string(title_page(
            "When two kids find and play a magical board game, they release a man trapped in it for decades, and a host of dangers.",
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/title/tt0113228"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html><body><p>Page moved</p></body></html>"),
        )
        .mount(&server)
        .await;
    // Anything else is a missing title
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("links.csv");
    let output = tmp.path().join("synopsis.csv");
    let report_path = tmp.path().join("report.json");
    std::fs::write(
        &input,
        "movieId,imdbId,tmdbId\n1,0114709,862\n2,0113497,8844\n3,0113228,15602\n4,0114885,31357\n",
    )
    .unwrap();

    let config = FetchConfig {
        base_url: format!("{}/title/tt", server.uri()),
        timeout: Duration::from_secs(5),
        cache_dir: Some(tmp.path().join("html")),
        ..FetchConfig::default()
    };
    let client = ImdbClient::new(config).unwrap();
    let options = RunOptions {
        input,
        output: output.clone(),
        limit: None,
    };

    let run_report = run(&options, &client).await.unwrap();
    report::write_report(&run_report, &report_path).unwrap();

    let rows: Vec<(String, String)> = csv::Reader::from_path(&output)
        .unwrap()
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string())
        })
        .collect();

    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0].0, "1");
    assert!(rows[0].1.starts_with("A cowboy doll is profoundly threatened"));
    assert_eq!(rows[1].0, "2");
    assert!(rows[1].1.ends_with("a host of dangers."));
    assert_eq!(rows[2], ("3".to_string(), String::new()));
    assert_eq!(rows[3], ("4".to_string(), String::new()));

    assert_eq!(run_report.found, 2);
    assert_eq!(run_report.missing, 1);
    assert_eq!(run_report.failed, 1);
    assert_eq!(run_report.failures[1].reason, "HTTP status 404");
    assert!(run_report.source.ends_with("/title/tt"));

    // Pages that were retrieved are cached, failed ones are not
    assert!(tmp.path().join("html/tt0114709.html").exists());
    assert!(tmp.path().join("html/tt0113228.html").exists());
    assert!(!tmp.path().join("html/tt0114885.html").exists());

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(saved["total"], 4);
}
