use archgraph::core::{build, statistics, CodebaseAnalyzer, CodebaseScanner};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_python_package(root: &Path, modules: usize) {
    let pkg = root.join("app");
    fs::create_dir_all(&pkg).unwrap();
    for i in 0..modules {
        let content = format!(
            r#"import os
from .module_{next} import Service{next}

class Service{i}:
    """Service number {i}."""

    def __init__(self, value):
        self.value = value

    def process(self):
        return self.calculate() * 2

    def calculate(self):
        return self.value + {i}

def main():
    return Service{i}({i}).process()
"#,
            i = i,
            next = (i + 1) % modules
        );
        fs::write(pkg.join(format!("module_{i}.py")), content).unwrap();
    }
}

fn write_web_tier(root: &Path, pages: usize) {
    let web = root.join("web");
    let js = web.join("js");
    fs::create_dir_all(&js).unwrap();
    for i in 0..pages {
        let page = format!(
            r#"<%@ page import="com.acme.Order{i}" %>
<%@ include file="header.jsp" %>
<html>
<body>
<c:forEach items="${{orders}}" var="o"><c:out value="${{o.id}}"/></c:forEach>
<script src="js/page_{i}.js"></script>
<a href="page_{next}.jsp">next</a>
</body>
</html>
"#,
            i = i,
            next = (i + 1) % pages
        );
        fs::write(web.join(format!("page_{i}.jsp")), page).unwrap();

        let script = format!(
            "import {{ api }} from './api';\nexport function render{i}() {{ return api.get({i}); }}\n"
        );
        fs::write(js.join(format!("page_{i}.js")), script).unwrap();
    }
    fs::write(web.join("header.jsp"), "<div>header</div>\n").unwrap();
    fs::write(js.join("api.js"), "export const api = {};\n").unwrap();
}

fn benchmark_analysis(c: &mut Criterion) {
    let mut group = c.benchmark_group("codebase_analysis");

    let small = TempDir::new().unwrap();
    write_python_package(small.path(), 10);
    write_web_tier(small.path(), 10);

    group.bench_function("small_codebase", |b| {
        b.iter(|| {
            let mut analyzer = CodebaseAnalyzer::new();
            black_box(analyzer.analyze(black_box(small.path())).unwrap())
        });
    });

    let large = TempDir::new().unwrap();
    write_python_package(large.path(), 200);
    write_web_tier(large.path(), 200);

    group.bench_function("large_codebase", |b| {
        b.iter(|| {
            let mut analyzer = CodebaseAnalyzer::new();
            black_box(analyzer.analyze(black_box(large.path())).unwrap())
        });
    });

    group.finish();
}

fn benchmark_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("dependency_resolution");

    let dir = TempDir::new().unwrap();
    write_python_package(dir.path(), 200);
    write_web_tier(dir.path(), 200);
    let metadata = CodebaseScanner::default().scan(dir.path()).unwrap();

    group.bench_function("build_and_statistics", |b| {
        b.iter(|| {
            let graph = build(black_box(&metadata.files));
            black_box(statistics(&graph))
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_analysis, benchmark_resolution);
criterion_main!(benches);
