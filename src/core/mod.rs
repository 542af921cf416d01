// Module declarations for `core`: everything that talks to the outside
// world (processes, git, files on disk) and the loop that ties it together.

// `config` module:
// Run options collected from the command line (`SweepConfig`) and the
// `CatalogManager` that loads and exports rule catalogs as TOML, JSON or YAML.
pub mod config;

// `engine` module:
// The `SweepEngine`: one rule at a time across every file, fingerprint
// before and after, commit when the content changed.
pub mod engine;

// `error` module:
// The `SweepError` taxonomy shared by the runner, the committer and the engine.
pub mod error;

// `git` module:
// Repository discovery through `git2` and the `CommitRecorder` that shells out
// to `git commit` for a single path.
pub mod git;

// `process` module:
// The `ProcessRunner` trait and its `std::process` implementation.
pub mod process;
