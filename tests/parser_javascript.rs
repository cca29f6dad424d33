use archgraph::core::{Language, ReferenceKind};
use archgraph::parsers::extract;

const SOURCE: &str = r#"import React from 'react';
import { api } from "./api";
import './styles.css';
const util = require('../lib/util');

export function render(props) {
  return null;
}

export default class App extends Component {}

const handler = async (e) => {};
let helper = x => x * 2;

function* gen() {}

async function lazy() {
  const mod = await import('./lazy');
}
"#;

#[test]
fn javascript_functions_classes_and_exports() {
    let out = extract(SOURCE, "src/app.js", Language::JavaScript);

    let functions: Vec<(&str, usize)> = out
        .functions
        .iter()
        .map(|f| (f.name.as_str(), f.line))
        .collect();
    assert_eq!(
        functions,
        vec![
            ("render", 6),
            ("handler", 12),
            ("helper", 13),
            ("gen", 15),
            ("lazy", 17),
        ]
    );

    assert_eq!(out.classes.len(), 1);
    assert_eq!(out.classes[0].name, "App");
    assert_eq!(out.classes[0].line, 10);

    assert_eq!(out.exports, vec!["render", "App"]);
}

#[test]
fn javascript_module_references_in_source_order() {
    let out = extract(SOURCE, "src/app.js", Language::JavaScript);

    assert_eq!(
        out.imports,
        vec!["react", "./api", "./styles.css", "../lib/util", "./lazy"]
    );

    let deps: Vec<(&str, usize)> = out
        .dependencies
        .iter()
        .map(|d| (d.raw_name.as_str(), d.line))
        .collect();
    assert_eq!(
        deps,
        vec![
            ("react", 1),
            ("./api", 2),
            ("./styles.css", 3),
            ("../lib/util", 4),
            ("./lazy", 18),
        ]
    );
    assert!(out
        .dependencies
        .iter()
        .all(|d| d.kind == ReferenceKind::Import));
}

#[test]
fn typescript_uses_the_same_extraction() {
    let code =
        "import { Order } from './models/order';\nexport const total = (o: Order) => o.sum;\n";
    let out = extract(code, "src/cart.ts", Language::TypeScript);

    assert_eq!(out.imports, vec!["./models/order"]);
    assert_eq!(out.exports, vec!["total"]);
}
