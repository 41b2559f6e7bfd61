//! End-to-end calls against the mock Solr server over real HTTP.
//!
//! # Design
//! Starts the mock server on a random port in a background tokio runtime,
//! then drives `Connection` with the bundled ureq transport. The mock echoes
//! what it received, so these tests check what actually went over the wire,
//! not just what the builder produced.

use solr_http_core::{
    ClientConfig, Connection, Method, Params, RequestOptions, SolrError, UreqTransport,
};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_solr::run(listener).await
        })
        .unwrap();
    });

    addr
}

/// Answer exactly one request with `200 OK` and `body`, whatever was asked.
fn serve_raw_once(body: Vec<u8>) -> std::net::SocketAddr {
    use std::io::{BufRead, BufReader, Write};

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    std::thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        while reader.read_line(&mut line).unwrap() > 0 && line != "\r\n" {
            line.clear();
        }
        let mut stream = reader.into_inner();
        let head = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        stream.write_all(head.as_bytes()).unwrap();
        stream.write_all(&body).unwrap();
    });

    addr
}

fn connect(url: &str) -> Connection<UreqTransport> {
    let config = ClientConfig::new(url).unwrap();
    let transport = UreqTransport::new(&config).unwrap();
    Connection::new(config, transport)
}

fn echo(ctx: &solr_http_core::CallContext) -> mock_solr::Echo {
    serde_json::from_str(&ctx.response.as_ref().unwrap().body).unwrap()
}

#[test]
fn round_trips_against_mock_solr() {
    let addr = start_mock_server();
    // No trailing slash: the config must add it or `select` resolves to /select.
    let solr = connect(&format!("http://{addr}/solr"));

    // Step 1: plain GET select.
    let params = Params::new().with("q", "title:rust").with("rows", 10).with("fq", vec!["a", "b"]);
    let ctx = solr.request("select", &params, None, RequestOptions::default()).unwrap();
    assert_eq!(ctx.request.method(), Method::Get);
    assert_eq!(ctx.status(), Some(200));
    let seen = echo(&ctx);
    assert_eq!(seen.method, "GET");
    assert_eq!(seen.query.as_deref(), Some("fq=a&fq=b&q=title%3Arust&rows=10"));
    assert!(seen.body.is_empty());

    // Step 2: forced POST duplicates the query into a form body.
    let ctx = solr
        .request("select", &Params::from([("q", "*:*")]), None, RequestOptions::post())
        .unwrap();
    let seen = echo(&ctx);
    assert_eq!(seen.method, "POST");
    assert_eq!(seen.query.as_deref(), Some("q=*%3A*"));
    assert_eq!(seen.body, "q=*%3A*");
    assert_eq!(seen.content_type.as_deref(), Some("application/x-www-form-urlencoded"));

    // Step 3: explicit XML body goes to update.
    let ctx = solr
        .request("update", &Params::from([("wt", "json")]), Some("<commit/>"), RequestOptions::default())
        .unwrap();
    assert_eq!(ctx.request.method(), Method::Post);
    let json: serde_json::Value = serde_json::from_str(&ctx.response.unwrap().body).unwrap();
    assert_eq!(json["responseHeader"]["status"], 0);

    // Step 4: ping has no params and no query.
    let ctx = solr.request("admin/ping", &Params::new(), None, RequestOptions::default()).unwrap();
    assert_eq!(ctx.request.uri.query(), None);

    // Step 5: unknown handler is a RequestError carrying the 404.
    let err = solr
        .request("nope", &Params::from([("q", "x")]), None, RequestOptions::default())
        .unwrap_err();
    let SolrError::Request(inner) = &err else {
        panic!("expected RequestError, got {err:?}");
    };
    assert_eq!(inner.error().status, 404);
    let ctx = inner.context();
    assert_eq!(ctx.request.uri.as_str(), format!("http://{addr}/solr/nope?q=x"));
    assert_eq!(ctx.response.as_ref().unwrap().body, "not found");

    // Step 6: a server-side 400 also surfaces as RequestError.
    let err = solr
        .request("update", &Params::new(), None, RequestOptions::post())
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

#[test]
fn connection_refused_is_transport_error_with_context() {
    // Grab a free port, then close it so nothing is listening.
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap()
    };
    let solr = connect(&format!("http://{addr}/solr/"));

    let err = solr
        .request("update", &Params::new(), Some("<optimize/>"), RequestOptions::default())
        .unwrap_err();

    assert!(matches!(err, SolrError::Transport(_)), "got {err:?}");
    assert!(err.transport_error().is_some());
    let ctx = err.context().unwrap();
    assert!(ctx.response.is_none());
    assert_eq!(ctx.request.uri.as_str(), format!("http://{addr}/solr/update"));
    assert_eq!(ctx.request.body.as_deref(), Some("<optimize/>"));
    assert_eq!(
        ctx.request.headers.get("Content-Type").map(String::as_str),
        Some("text/xml; charset=utf-8")
    );
}

#[test]
fn configuration_error_never_reaches_the_network() {
    let solr = connect("http://127.0.0.1:1/solr/");
    let err = solr
        .request("update", &Params::new(), Some("<commit/>"), RequestOptions::post())
        .unwrap_err();
    assert!(matches!(err, SolrError::Configuration(_)));
}

#[test]
fn large_body_is_returned_in_full() {
    let body = vec![b'x'; 11 * 1024 * 1024];
    let addr = serve_raw_once(body);
    let solr = connect(&format!("http://{addr}/solr/"));

    let ctx = solr
        .request("select", &Params::from([("q", "*:*"), ("rows", "100000")]), None, RequestOptions::default())
        .unwrap();

    let response = ctx.response.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body.len(), 11 * 1024 * 1024);
    assert_eq!(response.headers.get("content-type").map(String::as_str), Some("application/json"));
}

#[test]
fn non_utf8_body_is_decoded_lossily() {
    let addr = serve_raw_once(vec![0xff, 0xfe, b'o', b'k']);
    let solr = connect(&format!("http://{addr}/solr/"));

    let ctx = solr.request("select", &Params::new(), None, RequestOptions::default()).unwrap();

    let body = ctx.response.unwrap().body;
    assert!(body.ends_with("ok"), "got {body:?}");
    assert!(body.contains('\u{FFFD}'));
}

#[test]
fn body_limit_turns_oversized_body_into_transport_error() {
    let addr = serve_raw_once(vec![b'x'; 4096]);
    let config = ClientConfig::new(&format!("http://{addr}/solr/")).unwrap();
    let transport = UreqTransport::new(&config).unwrap().with_body_limit(1024);
    let solr = Connection::new(config, transport);

    let err = solr.request("select", &Params::new(), None, RequestOptions::default()).unwrap_err();

    assert!(matches!(err, SolrError::Transport(_)), "got {err:?}");
    assert_eq!(err.context().unwrap().request.uri.as_str(), format!("http://{addr}/solr/select"));
}

#[test]
fn prebuilt_agent_reports_statuses_as_data() {
    let addr = start_mock_server();
    let config = ClientConfig::new(&format!("http://{addr}/solr/")).unwrap();
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();
    let solr = Connection::new(config, UreqTransport::with_agent(agent));

    let ctx = solr.request("admin/ping", &Params::new(), None, RequestOptions::default()).unwrap();
    assert_eq!(ctx.status(), Some(200));

    let err = solr.request("missing", &Params::new(), None, RequestOptions::default()).unwrap_err();
    assert!(matches!(err, SolrError::Request(_)), "got {err:?}");
    assert_eq!(err.status(), Some(404));
}
