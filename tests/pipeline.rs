//! End-to-end pipeline tests against a local HTTP endpoint.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::Utc;
use sitewatch::error::AppError;
use sitewatch::models::{DataOrigin, FallbackDataset, FallbackReason, SourceConfig};
use sitewatch::pipeline::{LoadOptions, load_dashboard};
use sitewatch::services::{HttpSheetSource, SheetSource, normalize_rows, parse_sheet};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const HEADER: &str = "COWName,Tech,Lat,Long,TicketID,Issue,Severity,Status,CreatedAt,LastUpdate,Notes";

/// Serve a single canned HTTP response per connection.
async fn serve(status_line: &'static str, body: String) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((mut socket, _)) = listener.accept().await else {
                break;
            };
            let body = body.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                let mut request = Vec::new();
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut buf).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => request.extend_from_slice(&buf[..n]),
                    }
                }
                let response = format!(
                    "HTTP/1.1 {status_line}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    addr
}

fn source_for(addr: SocketAddr) -> HttpSheetSource {
    let config = SourceConfig {
        url: format!("http://{addr}/export?format=csv"),
        timeout_secs: 5,
        ..SourceConfig::default()
    };
    // Keep loopback requests away from any proxy set in the environment
    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()
        .unwrap();
    HttpSheetSource::with_client(client, config.url)
}

#[tokio::test]
async fn test_live_sheet_over_http() {
    let body = format!(
        "{HEADER}\nCWH001,5G,26.6868,37.9833,,,,,,,\nCWH002,4G,26.70,38.00,TKT01,\"Signal, weak\",High,Open,2024-01-01,2024-01-02,\"Check \"\"antenna\"\"\"\n"
    );
    let addr = serve("200 OK", body).await;
    let source = source_for(addr);

    let dash = load_dashboard(
        &source,
        &FallbackDataset::default(),
        &LoadOptions::default(),
        Utc::now(),
    )
    .await;

    assert_eq!(dash.origin, DataOrigin::Live);
    assert_eq!(dash.sites.len(), 2);
    assert_eq!(dash.tickets.len(), 1);
    assert_eq!(dash.tickets[0].issue, "Signal, weak");
    assert_eq!(dash.tickets[0].dispatcher_notes, "Check \"antenna\"");
    assert_eq!(dash.stats().availability, "100");
}

#[tokio::test]
async fn test_server_error_status() {
    let addr = serve("500 Internal Server Error", "oops".to_string()).await;
    let source = source_for(addr);

    assert!(matches!(
        source.fetch().await,
        Err(AppError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_server_error_falls_back() {
    let addr = serve("500 Internal Server Error", String::new()).await;
    let source = source_for(addr);
    let fallback = FallbackDataset::default();

    let dash = load_dashboard(&source, &fallback, &LoadOptions::default(), Utc::now()).await;

    assert!(matches!(
        dash.origin,
        DataOrigin::Fallback {
            reason: FallbackReason::Fetch(_)
        }
    ));
    assert_eq!(dash.sites.len(), fallback.sites.len());
    assert_eq!(dash.tickets.len(), fallback.tickets.len());
}

#[tokio::test]
async fn test_blank_body_is_rejected() {
    let addr = serve("200 OK", "  \n".to_string()).await;
    let source = source_for(addr);

    assert!(matches!(source.fetch().await, Err(AppError::EmptyBody(_))));
}

#[tokio::test]
async fn test_unreachable_host_falls_back() {
    // Bind then drop to get a port nothing listens on
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let source = source_for(addr);

    let dash = load_dashboard(
        &source,
        &FallbackDataset::default(),
        &LoadOptions::default(),
        Utc::now(),
    )
    .await;
    assert!(dash.is_fallback());
}

/// Free-text fragments that stress quoting.
const FRAGMENTS: &[&str] = &[
    "Signal",
    "weak, north gate",
    "\"quoted\"",
    "line\nbreak",
    "5\" cable",
    "crew says \"\"two hours\"\"",
    "a,b,,c",
    "multi\nline, with \"both\"",
];

/// Deterministic record `i`: 11 columns, blank optional cells on some rows.
fn generated_record(i: usize) -> Vec<String> {
    let text = |offset: usize| {
        let a = FRAGMENTS[(i + offset) % FRAGMENTS.len()];
        let b = FRAGMENTS[(i * 3 + offset) % FRAGMENTS.len()];
        format!("{a} {b}")
    };
    let optional = |value: String| if i % 5 == 0 { String::new() } else { value };

    vec![
        format!("CW{i:04}"),
        ["2G/4G", "5G", "", "LTE"][i % 4].to_string(),
        format!("{:.5}", 25.5 + i as f64 / 1000.0),
        if i % 7 == 0 { "n/a".to_string() } else { format!("{:.5}", 46.8 + i as f64 / 1000.0) },
        optional(format!("TKT-{i}")),
        optional(text(1)),
        optional(["Critical", "high", "Low priority", "medium"][i % 4].to_string()),
        optional(["Open", "In Progress", "closed", "Assigned"][i % 4].to_string()),
        optional("2025-12-09T12:30:00Z".to_string()),
        optional("2025-12-09T13:00:00Z".to_string()),
        optional(text(2)),
    ]
}

#[test]
fn test_csv_round_trip() {
    let records: Vec<Vec<String>> = (0..200).map(generated_record).collect();

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());
    writer.write_record(HEADER.split(',')).unwrap();
    for record in &records {
        writer.write_record(record).unwrap();
    }
    let text = String::from_utf8(writer.into_inner().unwrap()).unwrap();

    let sheet = parse_sheet(&text);
    assert_eq!(sheet.rows.len(), records.len());
    assert_eq!(sheet.skipped, 0);

    for (row, record) in sheet.rows.iter().zip(&records) {
        let optional = |value: &str| (!value.is_empty()).then(|| value.to_string());
        assert_eq!(row.identifier, record[0]);
        assert_eq!(row.technology, record[1]);
        assert_eq!(row.latitude, record[2]);
        assert_eq!(row.longitude, record[3]);
        assert_eq!(row.ticket_id, optional(&record[4]));
        assert_eq!(row.issue, optional(&record[5]));
        assert_eq!(row.severity, optional(&record[6]));
        assert_eq!(row.status, optional(&record[7]));
        assert_eq!(row.created_at, optional(&record[8]));
        assert_eq!(row.updated_at, optional(&record[9]));
        assert_eq!(row.notes, optional(&record[10]));
    }

    let (sites, tickets) = normalize_rows(&sheet.rows, Utc::now());
    assert_eq!(sites.len(), records.len());
    assert_eq!(tickets.len(), records.iter().filter(|r| !r[4].is_empty()).count());
}

#[test]
fn test_stray_quotes_in_unquoted_fields() {
    // Written by hand: a quote inside an unquoted cell is literal text
    let issues = ["Replace 5\" cable", "12\" dish loose", "say \"hi", "a\"b\"c"];
    let mut text = HEADER.to_string();
    for (i, issue) in issues.iter().enumerate() {
        text.push_str(&format!(
            "\nCW{i},4G,26.7,38.0,TKT{i},{issue},High,Resolved,2024-01-01,2024-01-02,ok"
        ));
    }

    let sheet = parse_sheet(&text);
    assert_eq!(sheet.rows.len(), issues.len());
    for (row, issue) in sheet.rows.iter().zip(issues) {
        assert_eq!(row.issue.as_deref(), Some(issue));
        assert_eq!(row.severity.as_deref(), Some("High"));
        assert_eq!(row.status.as_deref(), Some("Resolved"));
        assert_eq!(row.notes.as_deref(), Some("ok"));
    }
}

#[test]
fn test_dropped_rows_and_ticket_bound() {
    let text = format!(
        "{HEADER}\n\
         CWH001,5G,26.6,37.9,T1,,,,,,\n\
         too,few,fields\n\
         ,4G,26.6,37.9,T2,,,,,,\n\
         CWH003,4G,26.6,37.9,,,,,,,\n\
         CWH004,,x,y,T4,,,,,,\n"
    );
    let sheet = parse_sheet(&text);
    let (sites, tickets) = normalize_rows(&sheet.rows, Utc::now());

    let ids: Vec<_> = sites.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["CWH001", "CWH003", "CWH004"]);
    assert!(sites.iter().all(|s| !s.id.is_empty()));
    assert_eq!(tickets.len(), 2);
    assert!(tickets.len() <= sites.len());

    assert_eq!(sites[2].technology, "4G");
    assert!(!sites[2].is_plottable());
}

#[test]
fn test_parse_is_idempotent() {
    let text = format!("{HEADER}\nCWH001,5G/4G,26.6,37.9,T1,\"a, \"\"b\"\"\",High,Open,,,\n");
    let now = Utc::now();

    let first = normalize_rows(&parse_sheet(&text).rows, now);
    let second = normalize_rows(&parse_sheet(&text).rows, now);
    assert_eq!(first, second);
}
