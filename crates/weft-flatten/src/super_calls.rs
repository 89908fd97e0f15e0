//! Super-call renaming and rewriting.
//!
//! The flattened target has no dispatch chain, so "call my parent's
//! implementation" has to resolve against a flat namespace of uniquely
//! named implementations. [`SuperRenameTable`] assigns those names during
//! flattening; [`rewrite_batch`] retargets super references afterwards.

use rustc_hash::FxHashMap;

use weft_common::decl::{Body, BodyToken, MemberDecl, MemberKind};

/// The flat name for a shadowed ancestor implementation.
pub fn super_member_name(level: u32, name: &str) -> String {
    format!("__super_{level}_{name}")
}

/// Per-flattening-run occurrence counts for member names.
///
/// One table per composing type, discarded after the run; tables are never
/// shared across types, so independent flattenings stay independent.
#[derive(Debug, Default)]
pub struct SuperRenameTable {
    counts: FxHashMap<String, u32>,
}

impl SuperRenameTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide the emitted name for a member, updating the table.
    ///
    /// First occurrence keeps the plain name; it is recorded (counting from
    /// level 1) only when the member carries the override marker. Every
    /// later occurrence is renamed to `__super_<level>_<name>` and bumps
    /// the count, preserving each ancestor implementation as an
    /// independently callable member.
    pub fn rewrite_name(&mut self, name: &str, is_override: bool) -> String {
        if let Some(level) = self.counts.get(name).copied() {
            self.counts.insert(name.to_string(), level + 1);
            super_member_name(level, name)
        } else {
            if is_override {
                self.counts.insert(name.to_string(), 1);
            }
            name.to_string()
        }
    }

    /// The current super target for a reference to `name`, if any ancestor
    /// shadowing has been recorded for it.
    pub fn super_target(&self, name: &str) -> Option<String> {
        self.counts
            .get(name)
            .map(|level| super_member_name(*level, name))
    }
}

/// Rewrite every super reference in a batch of flattened members.
///
/// Applied once per ancestor batch, after the batch's members have taken
/// their final names: at that point the table's count for a name is exactly
/// the level of the implementation one step further up the chain. Names
/// with no recorded level pass through unchanged; they are presumed to
/// resolve through the host's ordinary inheritance.
pub fn rewrite_batch(members: &mut [MemberDecl], table: &SuperRenameTable) {
    for member in members {
        match &mut member.kind {
            MemberKind::Field { initializer, .. } => {
                rewrite_opt(initializer, table);
            }
            MemberKind::Property { initializer, body, .. } => {
                rewrite_opt(initializer, table);
                rewrite_opt(body, table);
            }
            MemberKind::Method { body, .. } => {
                rewrite_opt(body, table);
            }
        }
    }
}

fn rewrite_opt(body: &mut Option<Body>, table: &SuperRenameTable) {
    if let Some(body) = body {
        rewrite_body(body, table);
    }
}

fn rewrite_body(body: &mut Body, table: &SuperRenameTable) {
    for tok in &mut body.0 {
        if let BodyToken::SuperRef(name) = tok {
            if let Some(target) = table.super_target(name) {
                // The super reference collapses to a plain call on the
                // renamed flat member.
                *tok = BodyToken::Ident(target);
            }
        }
    }
}
