// This file is the module declaration file for the `builders` module.
// It declares and makes public the pure building blocks the engine is
// assembled from. None of them spawn processes.

// `files` module:
// The `FileEnumerator`, which resolves the files a run will touch from a
// start directory, a recursion flag and an extension filter.
pub mod files;

// `fingerprint` module:
// Content hashing used to tell whether the formatter actually changed a file.
pub mod fingerprint;

// `reporter` module:
// The `SweepReporter` trait and its `ConsoleReporter` implementation, which
// print progress notices, commands, formatter output and the final summary.
pub mod reporter;

// `rules` module:
// The `Rule` and `RuleCatalog` types and the built-in, hand-ordered catalog
// of pycodestyle codes.
pub mod rules;

// `validator` module:
// Checks run on rule catalogs loaded from disk (`CatalogValidator`,
// `StandardValidator`).
pub mod validator;
