//! Library API integration tests.
//!
//! These exercise the full offline pipeline (parse, extract, score, derive
//! issues) through the public API against inline fixtures. No network.

use std::collections::HashMap;

use sitepulse_core::*;

/// A page that should pass essentially every basic check.
fn healthy_page() -> String {
    let paragraph = "Trail running shoes take a different kind of abuse than road \
        shoes and the outsole compound matters far more than the marketing copy \
        admits. We log at least eighty miles on rock, mud, and fire roads before \
        writing a single word about grip, drainage, or durability."
        .to_string();

    let body: String = (0..8).map(|_| format!("<p>{}</p>", paragraph)).collect();

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <title>Trail Running Shoes Reviewed On Real Trails</title>
    <meta name="description" content="Trail running shoes reviewed after real miles on rock and mud.">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="robots" content="index, follow">
    <script type="application/ld+json">{{"@context": "https://schema.org", "@type": "Article"}}</script>
</head>
<body>
    <main>
        <h1>Trail running shoes</h1>
        <h2>How we test</h2>
        {body}
        <img src="/shoe.webp" alt="muddy trail shoe" width="400" height="300">
        <nav>
            <a href="/reviews">Shoe reviews</a>
            <a href="/guides">Buying guides</a>
            <a href="/about">About the testers</a>
            <a href="/contact">Contact</a>
            <a href="/archive">Review archive</a>
        </nav>
        <footer>
            <a href="https://twitter.com/trailshoes">Twitter</a>
            <a href="https://youtube.com/@trailshoes">YouTube</a>
            <a href="https://example.org/trail-association">Trail association</a>
        </footer>
    </main>
</body>
</html>"##
    )
}

/// An HTTP page missing nearly everything.
const DEGRADED_PAGE: &str = r#"
    <html>
    <body>
        <h1>Welcome</h1>
        <h1>Also welcome</h1>
        <p>Short.</p>
    </body>
    </html>
"#;

fn fetch_for(body: String, final_url: &str, elapsed_ms: u64) -> FetchResult {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), "text/html; charset=utf-8".to_string());

    FetchResult {
        status: 200,
        elapsed_ms,
        body,
        headers,
        final_url: final_url.to_string(),
    }
}

#[test]
fn test_healthy_page_scores_high_on_basic_tier() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let report = analyzer.analyze_document(&fetch, Tier::Basic, LinkCheckReport::default());

    assert!(report.score >= 85, "expected a healthy score, got {} (issues: {:?})", report.score, report.issues.free);
    assert!(
        report.issues.free.is_empty(),
        "healthy page should have no basic issues, got {:?}",
        report.issues.free
    );
}

#[test]
fn test_healthy_page_still_reports_advanced_gaps() {
    let analyzer = Analyzer::new();
    // No security headers in the fixture, so the advanced list is not empty.
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let report = analyzer.analyze_document(&fetch, Tier::Basic, LinkCheckReport::default());

    assert!(report.issues.pro.iter().any(|i| i.contains("security headers")));
}

#[test]
fn test_degraded_page_surfaces_fundamental_issues() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(DEGRADED_PAGE.to_string(), "http://old.example/", 1200);

    let report = analyzer.analyze_document(&fetch, Tier::Basic, LinkCheckReport::default());

    assert!(report.score < 50, "degraded page should score low, got {}", report.score);
    assert!(report.issues.free.contains(&"Site should use HTTPS".to_string()));
    assert!(report.issues.free.contains(&"Missing <title>".to_string()));
    assert!(report.issues.free.contains(&"Missing meta description".to_string()));
    assert!(report.issues.free.contains(&"Use exactly one <h1>".to_string()));
}

#[test]
fn test_advanced_tier_weighs_depth_checks() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let basic = analyzer.analyze_document(&fetch, Tier::Basic, LinkCheckReport::default());
    let advanced = analyzer.analyze_document(&fetch, Tier::Advanced, LinkCheckReport::default());

    // The fixture passes every basic check but lacks security headers and
    // complete social meta, so the advanced tier scores it lower.
    assert!(advanced.score < basic.score);
}

#[test]
fn test_same_input_same_report() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let a = analyzer.analyze_document(&fetch, Tier::Advanced, LinkCheckReport::default());
    let b = analyzer.analyze_document(&fetch, Tier::Advanced, LinkCheckReport::default());

    assert_eq!(a.score, b.score);
    assert_eq!(a.issues.free, b.issues.free);
    assert_eq!(a.issues.pro, b.issues.pro);
    assert_eq!(a.to_json().unwrap(), b.to_json().unwrap());
}

#[test]
fn test_broken_links_lower_the_score() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let clean = analyzer.analyze_document(&fetch, Tier::Basic, LinkCheckReport::default());
    let broken = analyzer.analyze_document(
        &fetch,
        Tier::Basic,
        LinkCheckReport {
            checked: 5,
            broken: 2,
            broken_links: vec![
                BrokenLink {
                    url: "https://trailshoes.example/gone".to_string(),
                    status: Some(404),
                    error_class: None,
                },
                BrokenLink {
                    url: "https://trailshoes.example/stale".to_string(),
                    status: None,
                    error_class: Some("timeout".to_string()),
                },
            ],
        },
    );

    assert!(broken.score < clean.score);
    assert!(broken.issues.free.iter().any(|i| i.contains("broken")));
}

#[test]
fn test_report_json_is_complete() {
    let analyzer = Analyzer::new();
    let fetch = fetch_for(healthy_page(), "https://trailshoes.example/", 150);

    let report = analyzer.analyze_document(&fetch, Tier::Advanced, LinkCheckReport::default());
    let json = report.to_json().unwrap();

    for key in ["url", "tier", "score", "fetch", "features", "links", "issues"] {
        assert!(json.get(key).is_some(), "missing top-level key {}", key);
    }
    assert_eq!(json["tier"], "advanced");
    assert!(json["features"].get("basics").is_some());
    assert!(json["issues"].get("free").is_some());
    assert!(json["issues"].get("pro").is_some());
}

#[tokio::test]
async fn test_analyze_rejects_malformed_urls() {
    assert!(analyze("", Tier::Basic).await.is_err());
    assert!(analyze("ftp://example.com", Tier::Basic).await.is_err());
}

#[test]
fn test_tier_parses_customer_facing_aliases() {
    assert_eq!("free".parse::<Tier>().unwrap(), Tier::Basic);
    assert_eq!("pro".parse::<Tier>().unwrap(), Tier::Advanced);
    assert!("enterprise".parse::<Tier>().is_err());
}
