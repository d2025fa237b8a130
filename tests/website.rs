use std::fs;
use std::path::Path;

use sitesim::{Error, Method, Request, Router, Simulator, LAST_REQUEST_PATH};
use tempfile::TempDir;

fn site(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().unwrap();
    for (rooted, contents) in files {
        write(dir.path(), rooted, contents);
    }
    dir
}

fn write(root: &Path, rooted: &str, contents: &str) {
    let path = root.join(rooted);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

async fn start(dir: &TempDir) -> (Simulator, Router) {
    let simulator = Simulator::load(dir.path()).await.unwrap();
    let router = simulator.router().unwrap();
    (simulator, router)
}

fn get(path: &str) -> Request {
    Request::new(Method::Get, path)
}

#[tokio::test]
async fn index_files_answer_their_directory() {
    let dir = site(&[
        ("index.html", "home"),
        ("about/index.html", "about index"),
        ("contact.html", "contact"),
    ]);
    let (_, router) = start(&dir).await;

    for (path, body) in [
        ("/", "home"),
        ("/index.html", "home"),
        ("/about", "about index"),
        ("/about/index.html", "about index"),
        ("/contact", "contact"),
        ("/contact.html", "contact"),
    ] {
        let res = router.respond(get(path)).await;
        assert_eq!(res.status_code(), 200, "{path}");
        assert_eq!(res.body(), body.as_bytes(), "{path}");
        assert_eq!(res.header("content-type"), Some("text/html"), "{path}");
    }

    assert_eq!(router.respond(get("/missing")).await.status_code(), 404);
}

#[tokio::test]
async fn negotiates_on_accept_header() {
    let dir = site(&[("data.html", "<b>data</b>"), ("data.json", r#"{"data":true}"#)]);
    let (_, router) = start(&dir).await;

    let json = router
        .respond(get("/data").with_header("Accept", "application/json"))
        .await;
    assert_eq!(json.status_code(), 200);
    assert_eq!(json.header("content-type"), Some("application/json"));
    assert_eq!(json.body(), br#"{"data":true}"#);

    let xml = router
        .respond(get("/data").with_header("Accept", "application/xml"))
        .await;
    assert_eq!(xml.status_code(), 412);

    // the extension pins the representation
    let pinned = router
        .respond(get("/data.html").with_header("Accept", "application/json"))
        .await;
    assert_eq!(pinned.status_code(), 412);
    let pinned = router.respond(get("/data.html")).await;
    assert_eq!(pinned.body(), b"<b>data</b>");
}

#[tokio::test]
async fn method_suffix_files_answer_their_method() {
    let dir = site(&[("page.json", r#"{"m":"get"}"#), ("page.json.POST", r#"{"m":"post"}"#)]);
    let (_, router) = start(&dir).await;

    let fetched = router.respond(get("/page")).await;
    let posted = router.respond(Request::new(Method::Post, "/page").with_body("x=1")).await;

    assert_eq!(fetched.body(), br#"{"m":"get"}"#);
    assert_eq!(posted.body(), br#"{"m":"post"}"#);
    assert_eq!(posted.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn at_segments_capture_route_parameters() {
    let dir = site(&[("people/@id.json", r#"{"person":1}"#), ("people/me.json", "me")]);
    let (simulator, router) = start(&dir).await;

    let res = router.respond(get("/people/42")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), br#"{"person":1}"#);
    let last = simulator.last_request().unwrap();
    assert_eq!(last.params.get("id").map(String::as_str), Some("42"));

    let res = router.respond(get("/people/me")).await;
    assert_eq!(res.body(), b"me");
    assert!(simulator.last_request().unwrap().params.is_empty());
}

#[tokio::test]
async fn parameter_routes_with_extension_pin_the_representation() {
    let dir = site(&[("people/@id.json", r#"{"person":1}"#)]);
    let (simulator, router) = start(&dir).await;

    let res = router.respond(get("/people/42.json")).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.header("content-type"), Some("application/json"));
    assert_eq!(res.body(), br#"{"person":1}"#);
    let last = simulator.last_request().unwrap();
    assert_eq!(last.path, "/people/42.json");
    assert_eq!(last.params.get("id").map(String::as_str), Some("42"));

    let res = router
        .respond(get("/people/42.json").with_header("Accept", "text/html"))
        .await;
    assert_eq!(res.status_code(), 412);
}

#[tokio::test]
async fn recorded_parameters_are_percent_decoded() {
    let dir = site(&[("people/@id.json", "{}")]);
    let (simulator, router) = start(&dir).await;

    router.respond(get("/people/john%20doe")).await;
    let last = simulator.last_request().unwrap();
    assert_eq!(last.path, "/people/john%20doe");
    assert_eq!(last.params.get("id").map(String::as_str), Some("john doe"));
}

#[tokio::test]
async fn accept_sent_on_several_lines_is_one_list() {
    let dir = site(&[("data.json", r#"{"data":true}"#)]);
    let (_, router) = start(&dir).await;

    let res = router
        .respond(
            get("/data")
                .with_header("accept", "text/html")
                .with_header("accept", "application/json"),
        )
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(res.body(), br#"{"data":true}"#);
}

#[tokio::test]
async fn empty_site_loads_and_answers_not_found() {
    let dir = TempDir::new().unwrap();
    let (simulator, router) = start(&dir).await;

    assert!(simulator.rules().is_empty());
    assert_eq!(router.respond(get("/")).await.status_code(), 404);
    assert!(simulator.last_request().is_none());
}

#[tokio::test]
async fn last_request_tracks_back_to_back_requests() {
    let dir = site(&[("a.html", "a"), ("b.json", "{}")]);
    let (simulator, router) = start(&dir).await;
    assert!(simulator.last_request().is_none());

    router.respond(get("/a")).await;
    router.respond(Request::new(Method::Delete, "/b")).await;

    let last = simulator.last_request().unwrap();
    assert_eq!(last.method, Method::Delete);
    assert_eq!(last.path, "/b");
    assert_eq!(simulator.requests().len(), 2);
}

#[tokio::test]
async fn last_request_endpoint_reports_json() {
    let dir = site(&[("a.html", "a")]);
    let (_, router) = start(&dir).await;

    let empty = router.respond(get(LAST_REQUEST_PATH)).await;
    assert_eq!(empty.body(), b"null");

    router.respond(Request::new(Method::Put, "/a")).await;
    let res = router.respond(get(LAST_REQUEST_PATH)).await;
    assert_eq!(res.header("content-type"), Some("application/json"));
    let last: serde_json::Value = serde_json::from_slice(res.body()).unwrap();
    assert_eq!(last["method"], "PUT");
    assert_eq!(last["path"], "/a");
}

#[tokio::test]
async fn fresh_session_starts_with_an_empty_log() {
    let dir = site(&[("a.html", "a")]);
    let (first, router) = start(&dir).await;
    router.respond(get("/a")).await;
    assert!(first.last_request().is_some());

    let (second, _) = start(&dir).await;
    assert!(second.last_request().is_none());
}

#[tokio::test]
async fn reloading_an_unchanged_tree_gives_the_same_table() {
    let dir = site(&[
        ("index.html", ""),
        ("x/@id/index.json", ""),
        ("x/list.json", ""),
        ("x/list.json.POST", ""),
    ]);
    let first = Simulator::load(dir.path()).await.unwrap();
    let second = Simulator::load(dir.path()).await.unwrap();
    assert_eq!(first.rules(), second.rules());
}

#[tokio::test]
async fn colliding_routes_fail_at_startup() {
    let dir = site(&[("a.html", ""), ("a.html.html", "")]);
    let err = Simulator::load(dir.path()).await.err().unwrap();
    assert!(matches!(err, Error::DuplicateRoute(_)));
}

#[tokio::test]
async fn conflicting_parameters_fail_at_startup() {
    let dir = site(&[("@id.html", ""), ("@name/index.json", "")]);
    let simulator = Simulator::load(dir.path()).await.unwrap();
    let err = simulator.router().err().unwrap();
    assert!(matches!(err, Error::InvalidRoute { .. }));
}
