pub mod analyzer;
pub mod error;
pub mod graph;
pub mod language;
pub mod record;
pub mod resolver;
pub mod scanner;
pub mod stats;

pub use analyzer::{Analysis, CodebaseAnalyzer};
pub use error::ScanError;
pub use graph::{build, DependencyEdge, DependencyGraph, FileNode, GraphBuilder};
pub use language::{Language, LanguageClassifier};
pub use record::{
    ClassInfo, Extraction, FileRecord, FunctionInfo, NamedItem, Reference, ReferenceKind,
};
pub use resolver::{DependencyResolver, FileIndex, ResolutionStrategy};
pub use scanner::{
    CodebaseMetadata, CodebaseScanner, LanguageStats, ProjectStructure, StructureBucket,
};
pub use stats::{statistics, CentralityEntry, GraphComplexity, GraphStatistics};
