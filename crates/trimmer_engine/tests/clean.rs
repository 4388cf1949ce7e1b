use pretty_assertions::assert_eq;
use scraper::{ElementRef, Html};
use trimmer_engine::{clean, is_denylisted, Cleaner, DenylistCleaner, DENYLIST};

/// Element names in document order, skipping denylisted subtrees.
fn surviving_names(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut names = Vec::new();
    collect(document.root_element(), &mut names);
    names
}

fn collect(element: ElementRef, names: &mut Vec<String>) {
    let name = element.value().name();
    if is_denylisted(name) {
        return;
    }
    names.push(name.to_string());
    for child in element.children().filter_map(ElementRef::wrap) {
        collect(child, names);
    }
}

fn all_names(html: &str) -> Vec<String> {
    let document = Html::parse_fragment(html);
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .map(|element| element.value().name().to_string())
        .collect()
}

const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Sample</title>
  <link rel="stylesheet" href="site.css">
  <style>body { color: red }</style>
  <script src="app.js"></script>
</head>
<body class="main">
  <nav><a href="/">Home</a><button type="button">Menu</button></nav>
  <article id="story">
    <h1>Heading</h1>
    <p>First <em>para</em> <img src="a.png" alt="a"></p>
    <div><div><span><script>deep()</script>text</span></div></div>
    <form action="/search"><input name="q"><button>Go</button><p>inside form</p></form>
    <p data-x="1">Last</p>
  </article>
  <noscript>enable js</noscript>
  <script>track()</script>
</body>
</html>"#;

#[test]
fn removes_example_denylisted_tags() {
    let input = "<html><head><title>T</title></head><body><script>alert(1)</script><p>hi</p><img src=a.png></body></html>";
    let cleaned = clean(input.as_bytes()).unwrap();
    assert!(cleaned.contains("<p>hi</p>"));
    assert!(!cleaned.contains("<script"));
    assert!(!cleaned.contains("<head"));
    assert!(!cleaned.contains("<img"));
    assert!(!cleaned.contains("<title"));
    assert_eq!(cleaned, "<html><body><p>hi</p></body></html>");
}

#[test]
fn no_denylisted_element_survives_at_any_depth() {
    let cleaned = clean(PAGE.as_bytes()).unwrap();
    let names = all_names(&cleaned);
    for denied in DENYLIST {
        assert!(
            !names.iter().any(|name| name == denied),
            "{denied} survived in {cleaned}"
        );
    }
    assert!(!cleaned.contains("<head"));
    assert!(!cleaned.contains("deep()"));
    assert!(!cleaned.contains("inside form"));
}

#[test]
fn surviving_elements_keep_order_and_ancestry() {
    let cleaned = clean(PAGE.as_bytes()).unwrap();
    assert_eq!(surviving_names(&cleaned), surviving_names(PAGE));
    assert_eq!(
        surviving_names(PAGE),
        vec![
            "html", "body", "nav", "a", "article", "h1", "p", "em", "div", "div", "span", "p",
            "noscript",
        ]
    );
}

#[test]
fn surviving_attributes_and_text_are_untouched() {
    let cleaned = clean(PAGE.as_bytes()).unwrap();
    assert!(cleaned.contains(r#"<html lang="en">"#));
    assert!(cleaned.contains(r#"<body class="main">"#));
    assert!(cleaned.contains(r#"<a href="/">Home</a>"#));
    assert!(cleaned.contains(r#"<article id="story">"#));
    assert!(cleaned.contains(r#"<p data-x="1">Last</p>"#));
    assert!(cleaned.contains("<span>text</span>"));
}

#[test]
fn doctype_is_preserved() {
    let cleaned = clean(PAGE.as_bytes()).unwrap();
    assert!(cleaned.starts_with("<!DOCTYPE html>"));
}

#[test]
fn cleaning_is_idempotent() {
    let once = clean(PAGE.as_bytes()).unwrap();
    let twice = clean(once.as_bytes()).unwrap();
    assert_eq!(surviving_names(&once), surviving_names(&twice));

    let compact = "<html><body><div><p>a</p><script>x</script><p>b</p></div></body></html>";
    let once = clean(compact.as_bytes()).unwrap();
    let twice = clean(once.as_bytes()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn document_without_denylisted_tags_is_unchanged() {
    let input = r#"<html><body><div class="c"><p>one</p><ul><li>a</li><li>b</li></ul></div></body></html>"#;
    let output = DenylistCleaner.clean(input.as_bytes()).unwrap();
    assert_eq!(output.html, input);
    // Only the parser-synthesized head.
    assert_eq!(output.removed_nodes, 1);
}

#[test]
fn bare_fragment_gets_wrapper_elements() {
    let cleaned = clean(b"<p>loose</p><style>p{}</style>").unwrap();
    assert_eq!(cleaned, "<html><body><p>loose</p></body></html>");
}

#[test]
fn malformed_markup_is_recovered_not_rejected() {
    let cleaned = clean(b"<div><p>unclosed<b>bold</div><meta name=x>tail").unwrap();
    assert!(cleaned.contains("unclosed"));
    assert!(cleaned.contains("<b>bold</b>"));
    assert!(cleaned.contains("tail"));
    assert!(!cleaned.contains("<meta"));
}

#[test]
fn empty_input_is_not_an_error() {
    assert_eq!(clean(b"").unwrap(), "<html><body></body></html>");
}

#[test]
fn binary_input_parses_as_text() {
    let cleaned = clean(&[0xff, 0xfe, 0x00, 0x41, 0x42]).unwrap();
    assert!(cleaned.starts_with("<html><body>"));
    assert!(cleaned.contains("AB"));
}
