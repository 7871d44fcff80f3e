//! Parameter slot resolution and synchronization planning.
//!
//! A line carries up to [`PARAM_SLOT_COUNT`] `(code, value)` slots. When
//! the line's item changes, the item catalog's default codes claim the
//! leading slots (in catalog order); the remaining slots are free-form.
//! At save time the slots are normalized into a sync set and reconciled
//! against the rows already stored for the line.

use offerdesk_core::ParamCode;

use crate::models::{LineParameter, ParamSlot, PARAM_SLOT_COUNT};

/// A resolved default: normalized code plus the catalog seed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDefault {
    pub code: ParamCode,
    /// `defaultValue` from the parameter definition, already stringified.
    pub default_value: Option<String>,
}

/// Normalize the catalog's raw default code list.
///
/// Deduplicates case-insensitively, preserves first-seen order, and caps
/// the result at the slot count. Codes that fail to parse (empty or
/// overlong) are skipped.
#[must_use]
pub fn dedupe_default_codes(raw: &[String]) -> Vec<ParamCode> {
    let mut codes: Vec<ParamCode> = Vec::new();
    for entry in raw {
        let Ok(code) = ParamCode::parse(entry) else {
            continue;
        };
        if !codes.contains(&code) {
            codes.push(code);
        }
        if codes.len() == PARAM_SLOT_COUNT {
            break;
        }
    }
    codes
}

/// Merge resolved defaults into the line's slots.
///
/// Default `i` claims slot `i` when the slot carries no value: the
/// default's code is written and the value is seeded from the catalog's
/// default. A slot already holding a value keeps both its code and its
/// value (the code is only case-normalized when it matches the default's);
/// user input is never overwritten or re-labeled. Slots beyond the
/// defaults are left untouched for free-form use.
pub fn seed_defaults(
    slots: &mut [Option<ParamSlot>; PARAM_SLOT_COUNT],
    defaults: &[ResolvedDefault],
) {
    for (slot, default) in slots.iter_mut().zip(defaults.iter()) {
        match slot {
            // A slot holding a value stays paired with its own code; a
            // value must never migrate to a code it was not entered for.
            Some(current) if !current.param_value.is_empty() => {
                if current.param_code.eq_ignore_ascii_case(default.code.as_str()) {
                    current.param_code = default.code.as_str().to_owned();
                }
            }
            _ => {
                *slot = Some(ParamSlot::new(
                    default.code.as_str(),
                    default.default_value.clone().unwrap_or_default(),
                ));
            }
        }
    }
}

/// Build the synchronization set from the slots.
///
/// Every slot with a non-empty code contributes its uppercase-normalized
/// code paired with its (possibly empty) value. Duplicate codes collapse
/// to the last slot's value.
#[must_use]
pub fn sync_set(slots: &[Option<ParamSlot>; PARAM_SLOT_COUNT]) -> Vec<(ParamCode, String)> {
    let mut set: Vec<(ParamCode, String)> = Vec::new();
    for slot in slots.iter().flatten() {
        let Ok(code) = ParamCode::parse(&slot.param_code) else {
            continue;
        };
        match set.iter_mut().find(|(existing, _)| *existing == code) {
            Some((_, value)) => value.clone_from(&slot.param_value),
            None => set.push((code, slot.param_value.clone())),
        }
    }
    set
}

/// One reconciliation step against the parameter store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncAction {
    /// No row exists for this code yet.
    Create { code: ParamCode, value: String },
    /// A row exists; push the new value onto it.
    Update {
        id: i64,
        code: ParamCode,
        value: String,
    },
    /// Remove-missing mode only: the stored code is no longer in the set.
    Delete { id: i64, code: ParamCode },
}

/// Plan the upsert-by-natural-key reconciliation.
///
/// Applying the resulting actions is idempotent: planning again after a
/// successful apply yields only value-preserving updates, and the stored
/// state is the same. With `remove_missing`, stored rows whose codes are
/// absent from the desired set are deleted; without it they are left
/// alone.
#[must_use]
pub fn plan_sync(
    existing: &[LineParameter],
    desired: &[(ParamCode, String)],
    remove_missing: bool,
) -> Vec<SyncAction> {
    let mut actions: Vec<SyncAction> = Vec::new();

    for (code, value) in desired {
        match existing.iter().find(|row| row.param_code == *code) {
            Some(row) => {
                if let Some(id) = row.id {
                    actions.push(SyncAction::Update {
                        id,
                        code: code.clone(),
                        value: value.clone(),
                    });
                }
            }
            None => actions.push(SyncAction::Create {
                code: code.clone(),
                value: value.clone(),
            }),
        }
    }

    if remove_missing {
        for row in existing {
            let still_wanted = desired.iter().any(|(code, _)| *code == row.param_code);
            if !still_wanted {
                if let Some(id) = row.id {
                    actions.push(SyncAction::Delete {
                        id,
                        code: row.param_code.clone(),
                    });
                }
            }
        }
    }

    actions
}
