use archgraph::core::{Language, ReferenceKind};
use archgraph::parsers::extract;

#[test]
fn jsp_directives_includes_forwards_and_tags() {
    let page = r#"<%@ page language="java" import="com.shop.Order, com.shop.Customer" %>
<%@ taglib prefix="c" uri="http://java.sun.com/jsp/jstl/core" %>
<%@ include file="header.jsp" %>
<html>
<body>
<jsp:include page="/fragments/menu.jsp" />
<c:forEach items="${orders}" var="o">
  <c:out value="${o.id}"/>
</c:forEach>
<jsp:include page="<%= dynamicPage %>" />
<a href="orders.jsp?page=2">Next</a>
<% if (done) { response.sendRedirect("thanks.jsp"); } %>
<jsp:forward page="error.jsp" />
</body>
</html>
"#;

    let out = extract(page, "web/index.jsp", Language::Jsp);

    assert_eq!(
        out.java_imports,
        vec!["com.shop.Order", "com.shop.Customer"]
    );
    assert_eq!(out.jsp_includes, vec!["header.jsp", "fragments/menu.jsp"]);
    assert_eq!(
        out.jsp_tags,
        vec!["jsp:include", "c:forEach", "c:out", "jsp:forward"]
    );

    let deps: Vec<(ReferenceKind, &str, usize)> = out
        .dependencies
        .iter()
        .map(|d| (d.kind, d.raw_name.as_str(), d.line))
        .collect();
    assert!(deps.contains(&(ReferenceKind::JavaImport, "com.shop.Order", 1)));
    assert!(deps.contains(&(ReferenceKind::JavaImport, "com.shop.Customer", 1)));
    assert!(deps.contains(&(ReferenceKind::JspInclude, "header.jsp", 3)));
    assert!(deps.contains(&(ReferenceKind::JspInclude, "fragments/menu.jsp", 6)));
    assert!(deps.contains(&(ReferenceKind::JspForward, "thanks.jsp", 12)));
    assert!(deps.contains(&(ReferenceKind::JspForward, "error.jsp", 13)));
    assert!(deps.contains(&(ReferenceKind::ResourceLink, "orders.jsp", 11)));
    assert_eq!(
        deps.iter()
            .filter(|(kind, _, _)| *kind == ReferenceKind::JspInclude)
            .count(),
        2,
        "runtime include expressions are skipped"
    );
}

#[test]
fn html_tag_histogram_and_local_links() {
    let page = r##"<!DOCTYPE html>
<HTML>
<head>
  <link rel="stylesheet" href="css/site.css?v=3">
  <script src="/js/app.js"></script>
  <script src="https://cdn.example.com/lib.js"></script>
</head>
<body>
  <a href="#top">Top</a>
  <a href='mailto:team@example.com'>Mail</a>
  <a href="//example.com/page">Elsewhere</a>
  <a href="about.html#team">About</a>
  <img src="img/logo.png">
</body>
</HTML>
"##;

    let out = extract(page, "index.html", Language::Html);

    assert_eq!(out.tags.get("html"), Some(&1));
    assert_eq!(out.tags.get("script"), Some(&2));
    assert_eq!(out.tags.get("a"), Some(&4));
    assert_eq!(out.total_tags, out.tags.values().sum::<usize>());

    assert_eq!(
        out.resource_links,
        vec!["css/site.css", "js/app.js", "about.html", "img/logo.png"]
    );
    assert!(out
        .dependencies
        .iter()
        .all(|d| d.kind == ReferenceKind::ResourceLink));
    assert_eq!(out.dependencies[0].line, 4);
    assert_eq!(out.dependencies[2].line, 12);
}

#[test]
fn css_selectors_and_imports() {
    let sheet = r#"@import "base.css";
@import url('theme/dark.css');
@import url("https://fonts.example.com/font.css");

body, html {
  margin: 0;
}

.nav > li a:hover {
  color: red;
}
"#;

    let out = extract(sheet, "static/site.css", Language::Css);

    assert_eq!(out.selectors, vec!["body, html", ".nav > li a:hover"]);
    assert_eq!(out.total_rules, 2);
    assert_eq!(out.css_imports, vec!["base.css", "theme/dark.css"]);

    let deps: Vec<(ReferenceKind, &str, usize)> = out
        .dependencies
        .iter()
        .map(|d| (d.kind, d.raw_name.as_str(), d.line))
        .collect();
    assert_eq!(
        deps,
        vec![
            (ReferenceKind::CssImport, "base.css", 1),
            (ReferenceKind::CssImport, "theme/dark.css", 2),
        ]
    );
}
