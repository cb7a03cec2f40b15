use rowan::TextRange;

/// Diagnostic kinds ordered by priority (highest priority first).
///
/// When two diagnostics overlap, the higher-priority one suppresses the
/// lower-priority one. This keeps a single mistake from producing a cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // These cause cascading errors throughout the rest of the file
    UnclosedBlock,
    UnclosedAlternatives,
    UnclosedParen,
    UnclosedBracket,

    // User omitted something required
    ExpectedIdentifier,
    ExpectedEquals,
    ExpectedType,
    ExpectedValue,
    ExpectedString,
    ExpectedCount,
    ExpectedDimensions,
    ExpectedFlag,

    // User wrote something that doesn't belong
    UnknownKeyword,
    UnknownFlag,
    InvalidBool,
    InvalidInteger,
    InvalidNumber,
    UnexpectedToken,

    // Valid syntax, invalid schema
    DuplicateIdentifier,
    DuplicateFieldName,
    DuplicateSelectionItem,
    UnknownDefault,
    EmptySelection,
    EmptyAlternatives,
    ZeroDimension,
    InvalidSchemaPath,
    InheritsNotFirst,

    // Harmless
    DuplicateFlag,
}

impl DiagnosticKind {
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::DuplicateFlag => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Lower discriminant = higher priority.
    pub fn suppresses(&self, other: &DiagnosticKind) -> bool {
        self < other
    }

    /// Unclosed delimiters: suppressed by root-cause errors at the same position.
    pub fn is_structural_error(&self) -> bool {
        matches!(
            self,
            Self::UnclosedBlock
                | Self::UnclosedAlternatives
                | Self::UnclosedParen
                | Self::UnclosedBracket
        )
    }

    pub fn is_root_cause_error(&self) -> bool {
        matches!(
            self,
            Self::ExpectedIdentifier
                | Self::ExpectedEquals
                | Self::ExpectedType
                | Self::ExpectedValue
                | Self::ExpectedString
                | Self::ExpectedCount
                | Self::ExpectedDimensions
                | Self::ExpectedFlag
        )
    }

    pub fn default_hint(&self) -> Option<&'static str> {
        match self {
            Self::ExpectedDimensions => Some("e.g., `matrix 3x3`"),
            Self::ExpectedFlag => Some("one of `*necessary`, `*expert`, `*hidden`"),
            Self::UnclosedAlternatives => Some("alternatives are closed with `}}`"),
            Self::DuplicateFieldName => Some("generated field names are snake_case"),
            _ => None,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedBlock => "missing closing `}`",
            Self::UnclosedAlternatives => "missing closing `}}`",
            Self::UnclosedParen => "missing closing `)`",
            Self::UnclosedBracket => "missing closing `]`",

            Self::ExpectedIdentifier => "expected identifier",
            Self::ExpectedEquals => "expected `=`",
            Self::ExpectedType => "expected parameter type",
            Self::ExpectedValue => "expected value",
            Self::ExpectedString => "expected string",
            Self::ExpectedCount => "expected element count",
            Self::ExpectedDimensions => "expected matrix dimensions",
            Self::ExpectedFlag => "expected flag name",

            Self::UnknownKeyword => "unknown parameter type",
            Self::UnknownFlag => "unknown flag",
            Self::InvalidBool => "expected `true` or `false`",
            Self::InvalidInteger => "invalid integer",
            Self::InvalidNumber => "invalid number",
            Self::UnexpectedToken => "unexpected token",

            Self::DuplicateIdentifier => "duplicate identifier",
            Self::DuplicateFieldName => "identifiers map to the same field name",
            Self::DuplicateSelectionItem => "duplicate selection item",
            Self::UnknownDefault => "default is not one of the options",
            Self::EmptySelection => "selection has no items",
            Self::EmptyAlternatives => "selectable subset has no alternatives",
            Self::ZeroDimension => "matrix dimensions must be positive",
            Self::InvalidSchemaPath => "invalid schema path",
            Self::InheritsNotFirst => "`inherits` must come before all entries",

            Self::DuplicateFlag => "flag given twice",
        }
    }

    /// Template for custom messages. Contains `{}` placeholder for caller-provided detail.
    pub fn custom_message(&self) -> String {
        match self {
            Self::UnknownKeyword => "`{}` is not a parameter type".to_string(),
            Self::UnknownFlag => "`{}` is not a flag".to_string(),
            Self::DuplicateIdentifier => "`{}` is already defined at this level".to_string(),
            Self::DuplicateSelectionItem => "`{}` is listed twice".to_string(),
            Self::UnknownDefault => "default `{}` is not one of the options".to_string(),
            Self::DuplicateFlag => "`{}` given twice".to_string(),
            Self::InvalidSchemaPath => "`{}` is not a schema path like `a::b::Name`".to_string(),

            Self::UnclosedBlock
            | Self::UnclosedAlternatives
            | Self::UnclosedParen
            | Self::UnclosedBracket => format!("{}; {{}}", self.fallback_message()),

            _ => format!("{}: {{}}", self.fallback_message()),
        }
    }

    /// `None` renders `fallback_message()`; `Some(detail)` renders
    /// `custom_message()` with `{}` replaced by `detail`.
    pub fn message(&self, msg: Option<&str>) -> String {
        match msg {
            None => self.fallback_message().to_string(),
            Some(detail) => self.custom_message().replace("{}", detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    /// The range used for suppression logic. Defaults to `range`; the parser
    /// widens it to the enclosing open delimiter.
    pub(crate) suppression_range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
    pub(crate) hints: Vec<String>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            suppression_range: range,
            message: message.into(),
            related: Vec::new(),
            hints: kind.default_hint().map(String::from).into_iter().collect(),
        }
    }

    pub(crate) fn with_default_message(kind: DiagnosticKind, range: TextRange) -> Self {
        Self::new(kind, range, kind.fallback_message())
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.default_severity()
    }

    pub(crate) fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    pub(crate) fn is_warning(&self) -> bool {
        self.severity() == Severity::Warning
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        for hint in &self.hints {
            write!(f, " (hint: {})", hint)?;
        }
        Ok(())
    }
}
