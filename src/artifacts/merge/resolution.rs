//! Per-file merge resolution
//!
//! Three-way merging compares every file's blob id at the split point, the
//! current head, and the target head, and picks one of four outcomes. The
//! table is pure: it sees only presence and id equality. The caller owns
//! the byte-level double check for same-content blobs and the side effects
//! (checkout, stage, unstage, conflict file).
//!
//! A side counts as modified when the file was removed, changed, or added
//! relative to the split point. The cases:
//!
//! - modified only in target: take the target version, or drop the file if
//!   the target removed it
//! - modified only in current (or in neither): keep the current version
//! - modified in both: keep when both removed or both hold the same id,
//!   otherwise conflict

/// The blob id of one file at the three commits of interest. `None` means
/// the commit does not track the file.
#[derive(Debug, Clone, Copy)]
pub struct Presence<'a> {
    pub split: Option<&'a str>,
    pub current: Option<&'a str>,
    pub target: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// No working-tree action; the current branch's view stands.
    KeepCurrent,
    /// Check the file out from the target head and stage it.
    TakeTarget,
    /// Remove the file from the working tree and stage its deletion.
    RemoveFromCurrent,
    /// Both sides changed it differently; render conflict markers.
    Conflict,
}

fn modified(split: Option<&str>, head: Option<&str>) -> bool {
    match (split, head) {
        (None, None) => false,
        (None, Some(_)) => true,
        (Some(_), None) => true,
        (Some(split_id), Some(head_id)) => split_id != head_id,
    }
}

pub fn resolve(presence: Presence<'_>) -> Resolution {
    let modified_current = modified(presence.split, presence.current);
    let modified_target = modified(presence.split, presence.target);

    match (modified_current, modified_target) {
        (_, false) => Resolution::KeepCurrent,
        (false, true) => match presence.target {
            Some(_) => Resolution::TakeTarget,
            None => Resolution::RemoveFromCurrent,
        },
        (true, true) => match (presence.current, presence.target) {
            (None, None) => Resolution::KeepCurrent,
            (Some(current_id), Some(target_id)) if current_id == target_id => {
                Resolution::KeepCurrent
            }
            _ => Resolution::Conflict,
        },
    }
}

/// Render the conflicted working-tree file: current content between the
/// HEAD marker and the separator, target content below it. A removed side
/// contributes no bytes.
pub fn render_conflict(current: &[u8], target: &[u8]) -> Vec<u8> {
    let mut rendered = Vec::with_capacity(current.len() + target.len() + 32);
    rendered.extend_from_slice(b"<<<<<<< HEAD\n");
    rendered.extend_from_slice(current);
    rendered.extend_from_slice(b"=======\n");
    rendered.extend_from_slice(target);
    rendered.extend_from_slice(b">>>>>>>\n");
    rendered
}
