//! Flag enums for the `run` dispatch, in place of boolean arguments.

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum Isolation {
    /// The invocation must not read ambient process environment or
    /// configuration beyond what the harness supplies explicitly.
    Isolated,
    Ambient,
}

impl Isolation {
    pub const fn is_isolated(self) -> bool {
        matches!(self, Self::Isolated)
    }
}

impl From<bool> for Isolation {
    fn from(value: bool) -> Self {
        if value { Self::Isolated } else { Self::Ambient }
    }
}

#[derive(Debug, Copy, Clone, Hash, PartialEq, Eq)]
pub enum RunnerKind {
    /// In-process execution through the rule instance.
    Direct,
    /// Execution through a command-line invocation of the lint tool.
    Cli,
}

impl RunnerKind {
    pub const fn is_cli(self) -> bool {
        matches!(self, Self::Cli)
    }
}

impl From<bool> for RunnerKind {
    fn from(value: bool) -> Self {
        if value { Self::Cli } else { Self::Direct }
    }
}
