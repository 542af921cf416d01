use serde::{Deserialize, Serialize};

/// A single style-violation category the formatter can be restricted to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    /// pycodestyle code passed to `--select`, e.g. `W291`.
    pub identifier: String,
    /// Human-readable text, used in progress notices and commit messages.
    pub description: String,
    /// Disabled rules stay in the catalog but are never swept.
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// The formatter only fixes this rule when given `--aggressive`.
    #[serde(default, skip_serializing_if = "is_false")]
    pub aggressive: bool,
}

fn default_enabled() -> bool {
    true
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl Rule {
    pub fn new(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
            enabled: true,
            aggressive: false,
        }
    }

    /// The comment used in the commit message: `"<identifier> <description>"`.
    pub fn comment(&self) -> String {
        format!("{} {}", self.identifier, self.description)
    }
}

struct RuleEntry {
    identifier: &'static str,
    description: &'static str,
    enabled: bool,
    aggressive: bool,
}

const fn rule(identifier: &'static str, description: &'static str) -> RuleEntry {
    RuleEntry {
        identifier,
        description,
        enabled: true,
        aggressive: false,
    }
}

const fn disabled(identifier: &'static str, description: &'static str) -> RuleEntry {
    RuleEntry {
        enabled: false,
        ..rule(identifier, description)
    }
}

const fn aggressive(identifier: &'static str, description: &'static str) -> RuleEntry {
    RuleEntry {
        aggressive: true,
        ..rule(identifier, description)
    }
}

// Order matters: whitespace at line ends and blank lines are cleaned up first so
// the spacing and indentation passes further down see normalised input.
// Duplicate codes are intentional and swept twice.
const BUILTIN_RULES: &[RuleEntry] = &[
    rule("W391", "blank line at end of file"),
    rule("W291", "trailing whitespace"),
    rule("W293", "blank line contains whitespace"),
    rule("W191", "indentation contains tabs"),
    rule("E101", "indentation contains mixed spaces and tabs"),
    // autopep8 never seems to apply this one on its own.
    disabled("E111", "Reindent all lines."),
    // Line spacing
    rule("E301", "expected 1 blank line, found 0"),
    rule("E302", "line spacing between functions and classes"),
    rule("E303", "linespacing between functions and classes"),
    rule("E304", "Remove blank line following function decorator."),
    // Whitespace
    rule("E211", "Remove extraneous whitespace."),
    rule("E221", "Fix extraneous whitespace around keywords."),
    rule("E222", "Fix extraneous whitespace around keywords."),
    rule("E223", "Fix extraneous whitespace around keywords."),
    rule("E224", "Remove extraneous whitespace around operator."),
    rule("E225", "Fix missing whitespace around operator."),
    rule("E226", "Fix missing whitespace around operator."),
    rule("E227", "Fix missing whitespace around operator."),
    rule("E228", "Fix missing whitespace around operator."),
    rule("E231", "Add missing whitespace."),
    rule("E261", "whitespace after inline comment"),
    rule("E241", "Fix extraneous whitespace around keywords."),
    rule("E242", "Remove extraneous whitespace around operator."),
    rule("E251", "Remove whitespace around parameter '=' sign."),
    rule("E261", "Fix spacing after comment hash."),
    rule("E262", "Fix spacing after comment hash."),
    rule("E203", "whitespace before colon"),
    rule("E201", "whitespace around [ and ]"),
    rule("E202", "whitespace around [ and ]"),
    rule("E251", "unexpected whitespace around parameter equals"),
    rule("E271", "Fix extraneous whitespace around keywords."),
    rule("E272", "Fix extraneous whitespace around keywords."),
    rule("E273", "Fix extraneous whitespace around keywords."),
    rule("E274", "Fix extraneous whitespace around keywords."),
    // Multiple statements
    rule("E701", "multiple statements on one line (colon)"),
    rule(
        "E702",
        "Put semicolon-separated compound statement on separate lines.",
    ),
    rule(
        "E703",
        "Put semicolon-separated compound statement on separate lines.",
    ),
    // Multiple imports
    rule("E401", "multiple imports on one line"),
    disabled(
        "E501",
        "Try to make lines fit within --max-line-length characters.",
    ),
    rule("E502", "the backslash is redundant between brackets"),
    rule("W601", ".has_key() is deprecated, use 'in'"),
    rule("W602", "Fix deprecated form of raising exception."),
    rule("W603", "Replace <> with !=."),
    rule("W604", "Replace backticks with repr()."),
    aggressive("E711", "comparison to None should be 'if cond is None:'"),
    aggressive(
        "E712",
        "comparison to True should be 'if cond is True:' or 'if cond:'",
    ),
    disabled("E721", "Switch to use isinstance()."),
    // Indentation
    rule("E121", "continuation line indentation is not a multiple of four"),
    // autopep8's rewrites for the hanging-indent family are rough; review
    // these commits carefully.
    rule("E122", "Add absent indentation for hanging indentation"),
    rule(
        "E123",
        "closing bracket does not match indentation of opening bracket's line",
    ),
    rule("E124", "closing bracket does not match visual indentation"),
    rule(
        "E125",
        "continuation line does not distinguish itself from next logical line",
    ),
    rule("E126", "continuation line over-indented for hanging indent"),
    rule("E127", "continuation line over-indented for visual indent"),
    rule("E128", "continuation line under-indented for visual indent"),
];

/// The ordered list of rules a run sweeps through.
///
/// Order and duplicates are preserved exactly as given. The same type is
/// what gets written to and read from `--rules` / `--export-rules` files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleCatalog {
    pub version: String,
    pub rules: Vec<Rule>,
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self {
            version: "1.0".to_string(),
            rules,
        }
    }

    /// The catalog shipped with the binary.
    pub fn builtin() -> Self {
        let rules = BUILTIN_RULES
            .iter()
            .map(|entry| Rule {
                identifier: entry.identifier.to_string(),
                description: entry.description.to_string(),
                enabled: entry.enabled,
                aggressive: entry.aggressive,
            })
            .collect();
        Self::new(rules)
    }

    /// Builds an all-enabled catalog from `(identifier, description)` pairs.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(identifier, description)| Rule::new(*identifier, *description))
                .collect(),
        )
    }

    /// Rules that take part in a sweep, in catalog order.
    pub fn enabled(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter().filter(|rule| rule.enabled)
    }

    pub fn enabled_count(&self) -> usize {
        self.enabled().count()
    }
}
