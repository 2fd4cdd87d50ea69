//! Declarative legacy-to-ztc flag mapping tables.

use super::LegacyCommand;

/// How faithfully a translated flag reproduces the legacy behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagClass {
    /// Same behavior under the translated spelling.
    Exact,
    /// Nearest equivalent; the behavior difference is always warned about.
    Approximate,
    /// Accepted by ztc but does nothing there.
    NoOp,
    /// No safe translation exists; the invocation is refused. No shipped
    /// table uses it yet: a legacy flag whose ztc counterpart is removed gets
    /// an entry of this class instead of silently passing through.
    Unsupported,
}

/// One legacy flag spelling and what it becomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagMapping {
    pub legacy: &'static str,
    pub translated: &'static str,
    pub class: FlagClass,
    /// The flag consumes exactly one following token as its value.
    pub takes_value: bool,
    pub warning: Option<&'static ApproximationNote>,
}

/// Warning surfaced whenever an approximate mapping is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApproximationNote {
    pub headline: &'static str,
    /// What the legacy flag did that the translation does not.
    pub lost: &'static str,
}

impl FlagMapping {
    const fn exact(legacy: &'static str, translated: &'static str) -> Self {
        Self {
            legacy,
            translated,
            class: FlagClass::Exact,
            takes_value: false,
            warning: None,
        }
    }

    const fn with_value(legacy: &'static str, translated: &'static str) -> Self {
        Self {
            legacy,
            translated,
            class: FlagClass::Exact,
            takes_value: true,
            warning: None,
        }
    }

    /// The single flag character when this is a short spelling (`-n`).
    pub fn short_char(&self) -> Option<char> {
        let mut chars = self.legacy.strip_prefix('-')?.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '-' => Some(c),
            _ => None,
        }
    }
}

/// Character rename applied inside a short-flag cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShortRename {
    pub legacy: char,
    pub translated: char,
    pub class: FlagClass,
}

/// What happens to a short-flag cluster such as `-uvtd`.
#[derive(Debug, Clone, Copy)]
pub enum ClusterPolicy {
    /// Rename characters in place; unmapped characters pass unchanged.
    Rename(&'static [ShortRename]),
    /// Expand into the table's translations when every character is a
    /// known boolean short flag; otherwise pass the token verbatim.
    Expand,
}

/// Complete mapping contract for one legacy entry point.
#[derive(Debug)]
pub struct CommandTable {
    pub command: LegacyCommand,
    pub flags: &'static [FlagMapping],
    pub cluster: ClusterPolicy,
}

impl CommandTable {
    /// Mapping tables exist only for commands that can be translated.
    pub fn for_command(command: LegacyCommand) -> Option<&'static CommandTable> {
        match command {
            LegacyCommand::Fix => None,
            LegacyCommand::Prepare => Some(&PREPARE),
            LegacyCommand::Scan => Some(&SCAN),
        }
    }

    pub fn lookup(&self, token: &str) -> Option<&'static FlagMapping> {
        self.flags.iter().find(|mapping| mapping.legacy == token)
    }

    pub fn lookup_short(&self, flag: char) -> Option<&'static FlagMapping> {
        self.flags
            .iter()
            .find(|mapping| mapping.short_char() == Some(flag))
    }
}

/// `-v` collides with ztc's global `--verbose`, hence the uppercase rename.
const PREPARE_SHORT: &[ShortRename] = &[
    ShortRename {
        legacy: 'u',
        translated: 'u',
        class: FlagClass::NoOp,
    },
    ShortRename {
        legacy: 'v',
        translated: 'V',
        class: FlagClass::Exact,
    },
    ShortRename {
        legacy: 't',
        translated: 't',
        class: FlagClass::Exact,
    },
    ShortRename {
        legacy: 'd',
        translated: 'd',
        class: FlagClass::Exact,
    },
];

pub static DUMP_WARNING: ApproximationNote = ApproximationNote {
    headline: "--dump is approximated as --dry-run (no disk dump).",
    lost: "The legacy dump wrote collected host data to disk; --dry-run only skips the push to Zabbix and writes no host data to disk.",
};

static PREPARE: CommandTable = CommandTable {
    command: LegacyCommand::Prepare,
    flags: &[
        FlagMapping::exact("--vhosts", "--virtual-hosts"),
        FlagMapping::exact("--template", "--templates"),
        FlagMapping::with_value("-c", "-c"),
        FlagMapping::with_value("--config", "--config"),
    ],
    cluster: ClusterPolicy::Rename(PREPARE_SHORT),
};

static SCAN: CommandTable = CommandTable {
    command: LegacyCommand::Scan,
    flags: &[
        FlagMapping::exact("-n", "--nopush"),
        FlagMapping::exact("--nopush", "--nopush"),
        FlagMapping::with_value("-l", "--limit"),
        FlagMapping::with_value("--limit", "--limit"),
        FlagMapping {
            legacy: "-d",
            translated: "--dry-run",
            class: FlagClass::Approximate,
            takes_value: false,
            warning: Some(&DUMP_WARNING),
        },
        FlagMapping {
            legacy: "--dump",
            translated: "--dry-run",
            class: FlagClass::Approximate,
            takes_value: false,
            warning: Some(&DUMP_WARNING),
        },
        FlagMapping::with_value("-c", "-c"),
        FlagMapping::with_value("--config", "--config"),
    ],
    cluster: ClusterPolicy::Expand,
};
