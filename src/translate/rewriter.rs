//! Token-by-token rewriting of flag-style legacy arguments.
//!
//! Tokens are visited in order. A token is only ever inspected as a flag when
//! it sits in flag position: values consumed by a value-taking flag and every
//! token after `--` are copied without looking at their contents.

use std::ffi::{OsStr, OsString};
use std::slice;

use log::debug;

use super::refusal::{self, Refusal};
use super::table::{
    ApproximationNote, ClusterPolicy, CommandTable, FlagClass, FlagMapping, ShortRename,
};
use crate::diagnostics::Diagnostic;

/// Output of a successful rewrite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewritten {
    pub args: Vec<OsString>,
    /// One entry per distinct lossy approximation, in first-seen order.
    pub warnings: Vec<Diagnostic>,
}

/// Returns true for `-x...`: one dash followed by at least one byte that is
/// not a dash. `-` alone and `--long` tokens are not clusters.
pub fn is_short_cluster(token: &[u8]) -> bool {
    match token.split_first() {
        Some((b'-', rest)) => rest.first().is_some_and(|&first| first != b'-'),
        _ => false,
    }
}

/// A cluster token after character renaming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamedCluster {
    pub token: Vec<u8>,
    /// Value-taking flag closing the cluster; its value is the next token.
    pub pending_value: Option<&'static FlagMapping>,
}

/// Renames flag characters inside one cluster token. Unmapped characters are
/// kept. The first value-taking flag ends the cluster and everything after it
/// is that flag's value, copied verbatim.
///
/// Works on bytes so a cluster that is not valid UTF-8 is renamed too. Only
/// ASCII bytes are ever compared against the tables.
pub fn rename_cluster(
    token: &[u8],
    renames: &[ShortRename],
    table: &CommandTable,
) -> RenamedCluster {
    let Some((&b'-', flags)) = token.split_first() else {
        return RenamedCluster {
            token: token.to_vec(),
            pending_value: None,
        };
    };

    let mut renamed = Vec::with_capacity(token.len());
    renamed.push(b'-');
    for (index, &byte) in flags.iter().enumerate() {
        if !byte.is_ascii() {
            renamed.push(byte);
            continue;
        }
        let flag = char::from(byte);

        if let Some(mapping) = table.lookup_short(flag).filter(|mapping| mapping.takes_value) {
            renamed.extend_from_slice(&flags[index..]);
            return RenamedCluster {
                token: renamed,
                pending_value: (index + 1 == flags.len()).then_some(mapping),
            };
        }

        match renames.iter().find(|rename| rename.legacy == flag) {
            Some(rename) => {
                if rename.class == FlagClass::NoOp {
                    debug!("-{} is accepted by ztc but has no effect", flag);
                }
                renamed.push(ascii_byte(rename.translated).unwrap_or(byte));
            }
            None => renamed.push(byte),
        }
    }

    RenamedCluster {
        token: renamed,
        pending_value: None,
    }
}

fn ascii_byte(flag: char) -> Option<u8> {
    u8::try_from(flag).ok().filter(u8::is_ascii)
}

/// Expands a cluster into the table's translations when every character is a
/// known boolean short flag. Returns `None` when the cluster must be kept
/// verbatim.
pub fn expand_cluster(token: &str, table: &CommandTable) -> Option<Vec<&'static FlagMapping>> {
    let flags = token.strip_prefix('-')?;
    flags
        .chars()
        .map(|flag| {
            table
                .lookup_short(flag)
                .filter(|mapping| !mapping.takes_value && mapping.class != FlagClass::Unsupported)
        })
        .collect()
}

#[cfg(unix)]
fn token_bytes(token: &OsStr) -> Option<&[u8]> {
    use std::os::unix::ffi::OsStrExt;
    Some(token.as_bytes())
}

#[cfg(not(unix))]
fn token_bytes(token: &OsStr) -> Option<&[u8]> {
    token.to_str().map(str::as_bytes)
}

#[cfg(unix)]
fn token_from_bytes(bytes: Vec<u8>) -> OsString {
    use std::os::unix::ffi::OsStringExt;
    OsString::from_vec(bytes)
}

// Only UTF-8 tokens reach here, and ASCII-for-ASCII renames keep them UTF-8.
#[cfg(not(unix))]
fn token_from_bytes(bytes: Vec<u8>) -> OsString {
    OsString::from(String::from_utf8_lossy(&bytes).into_owned())
}

/// Applies one command's mapping table to a flag-style token sequence.
pub struct FlagRewriter {
    table: &'static CommandTable,
}

impl FlagRewriter {
    pub fn new(table: &'static CommandTable) -> Self {
        Self { table }
    }

    pub fn rewrite(&self, tokens: &[OsString]) -> Result<Rewritten, Refusal> {
        let mut state = RewriteState::default();
        let mut remaining = tokens.iter();

        while let Some(token) = remaining.next() {
            if state.options_ended {
                state.args.push(token.clone());
                continue;
            }

            let text = token.to_str();

            if text == Some("--") {
                state.options_ended = true;
                state.args.push(token.clone());
                continue;
            }

            if let Some(mapping) = text.and_then(|text| self.table.lookup(text)) {
                self.apply(mapping, tokens, &mut state)?;
                if mapping.takes_value {
                    self.take_value(mapping, &mut remaining, tokens, &mut state)?;
                }
                continue;
            }

            if self.rewrite_cluster(token, &mut remaining, tokens, &mut state)? {
                continue;
            }

            if text.is_none() {
                debug!("Passing non-UTF-8 argument through unchanged");
            }
            state.args.push(token.clone());
        }

        Ok(Rewritten {
            args: state.args,
            warnings: state.warnings,
        })
    }

    /// Rewrites `token` if it is a short-flag cluster. Returns false when it
    /// is not one and still has to be handled.
    fn rewrite_cluster(
        &self,
        token: &OsStr,
        remaining: &mut slice::Iter<'_, OsString>,
        tokens: &[OsString],
        state: &mut RewriteState,
    ) -> Result<bool, Refusal> {
        match self.table.cluster {
            ClusterPolicy::Rename(renames) => {
                let Some(bytes) = token_bytes(token).filter(|bytes| is_short_cluster(bytes)) else {
                    return Ok(false);
                };

                let renamed = rename_cluster(bytes, renames, self.table);
                if renamed.token.as_slice() != bytes {
                    debug!(
                        "Renamed short-flag cluster {} -> {}",
                        String::from_utf8_lossy(bytes),
                        String::from_utf8_lossy(&renamed.token)
                    );
                }
                state.args.push(token_from_bytes(renamed.token));

                if let Some(mapping) = renamed.pending_value {
                    self.take_value(mapping, remaining, tokens, state)?;
                }
            }
            ClusterPolicy::Expand => {
                let Some(text) = token
                    .to_str()
                    .filter(|text| is_short_cluster(text.as_bytes()))
                else {
                    return Ok(false);
                };

                match expand_cluster(text, self.table) {
                    Some(mappings) => {
                        debug!("Expanding short-flag cluster {}", text);
                        for mapping in mappings {
                            self.apply(mapping, tokens, state)?;
                        }
                    }
                    None => {
                        debug!("Passing unknown short flags {} through unchanged", text);
                        state.args.push(token.to_os_string());
                    }
                }
            }
        }
        Ok(true)
    }

    /// Copies the token following a value-taking flag without inspecting it.
    fn take_value(
        &self,
        mapping: &FlagMapping,
        remaining: &mut slice::Iter<'_, OsString>,
        tokens: &[OsString],
        state: &mut RewriteState,
    ) -> Result<(), Refusal> {
        let value = remaining.next().ok_or_else(|| {
            refusal::missing_value(
                self.table.command,
                mapping.legacy,
                mapping.translated,
                tokens,
            )
        })?;
        state.args.push(value.clone());
        Ok(())
    }

    /// Pushes the translated spelling of one flag, recording warnings.
    fn apply(
        &self,
        mapping: &FlagMapping,
        tokens: &[OsString],
        state: &mut RewriteState,
    ) -> Result<(), Refusal> {
        match mapping.class {
            FlagClass::Unsupported => {
                return Err(refusal::unsupported_flag(
                    self.table.command,
                    mapping.legacy,
                    tokens,
                ));
            }
            FlagClass::Approximate => {
                debug!(
                    "Approximating {} as {}",
                    mapping.legacy, mapping.translated
                );
                if let Some(note) = mapping.warning {
                    state.warn(approximation_warning(self.table, mapping, note));
                }
            }
            FlagClass::NoOp => {
                debug!("{} is accepted by ztc but has no effect", mapping.legacy);
            }
            FlagClass::Exact => {
                if mapping.legacy != mapping.translated {
                    debug!("Renamed {} -> {}", mapping.legacy, mapping.translated);
                }
            }
        }

        state.args.push(OsString::from(mapping.translated));
        Ok(())
    }
}

fn approximation_warning(
    table: &CommandTable,
    mapping: &FlagMapping,
    note: &ApproximationNote,
) -> Diagnostic {
    Diagnostic::warning(
        note.headline,
        vec![
            note.lost.to_string(),
            format!(
                "Call ztc directly to avoid this warning: ztc {} {}",
                table.command.subcommand(),
                mapping.translated
            ),
        ],
    )
}

#[derive(Default)]
struct RewriteState {
    args: Vec<OsString>,
    warnings: Vec<Diagnostic>,
    options_ended: bool,
}

impl RewriteState {
    fn warn(&mut self, diagnostic: Diagnostic) {
        if !self.warnings.contains(&diagnostic) {
            self.warnings.push(diagnostic);
        }
    }
}
