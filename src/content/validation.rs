//! Validation for cross-references and value ranges in content definitions.

use super::data::*;
use super::registry::ContentRegistry;

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    MissingRef {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        target_type: &'static str,
        missing_id: String,
    },
    InvalidValue {
        source_type: &'static str,
        source_id: String,
        field: &'static str,
        message: String,
    },
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingRef {
                source_type,
                source_id,
                field,
                target_type,
                missing_id,
            } => write!(
                f,
                "{} '{}' references missing {} '{}' in field '{}'",
                source_type, source_id, target_type, missing_id, field
            ),
            ValidationError::InvalidValue {
                source_type,
                source_id,
                field,
                message,
            } => write!(f, "{} '{}' has invalid '{}': {}", source_type, source_id, field, message),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Helper macro for checking a reference exists
macro_rules! check_ref {
    ($errors:expr, $registry_map:expr, $source_type:expr, $source_id:expr, $field:expr, $target_type:expr, $ref_id:expr) => {
        if !$registry_map.contains_key($ref_id) {
            $errors.push(ValidationError::MissingRef {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                target_type: $target_type,
                missing_id: $ref_id.to_string(),
            });
        }
    };
}

/// Helper macro for a value-range check
macro_rules! check_value {
    ($errors:expr, $ok:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$ok {
            $errors.push(ValidationError::InvalidValue {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

/// Validate all cross-references and values in the registry.
/// Returns a list of validation errors, empty if all content is usable.
pub fn validate_content(registry: &ContentRegistry) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Validate fighters
    for (id, fighter) in &registry.fighters {
        check_ref!(errors, registry.poses, "Fighter", id, "stance_pose", "Pose", &fighter.stance_pose);
        for ability_id in &fighter.ability_ids {
            check_ref!(errors, registry.abilities, "Fighter", id, "ability_ids", "Ability", ability_id);
        }
        check_value!(
            errors,
            fighter.hitbox_height.is_finite() && fighter.hitbox_height > 0.0,
            "Fighter",
            id,
            "hitbox_height",
            "expected a positive number, got {}",
            fighter.hitbox_height
        );
        check_value!(
            errors,
            fighter.max_health.is_finite() && fighter.max_health > 0.0,
            "Fighter",
            id,
            "max_health",
            "expected a positive number, got {}",
            fighter.max_health
        );
        check_value!(
            errors,
            fighter.actor_scale.is_finite() && fighter.actor_scale > 0.0,
            "Fighter",
            id,
            "actor_scale",
            "expected a positive number, got {}",
            fighter.actor_scale
        );
    }

    // Validate moves
    for (id, mv) in &registry.moves {
        check_value!(errors, !mv.phases.is_empty(), "Move", id, "phases", "no phases");
        for phase in &mv.phases {
            check_ref!(errors, registry.poses, "Move", id, "phases.pose_id", "Pose", &phase.pose_id);
            check_value!(
                errors,
                phase.duration_ms.is_finite() && phase.duration_ms >= 0.0,
                "Move",
                id,
                "phases.duration_ms",
                "phase '{}' has duration {}",
                phase.phase,
                phase.duration_ms
            );
        }
        for step in &mv.sequence {
            check_ref!(errors, registry.moves, "Move", id, "sequence.move_id", "Move", &step.move_id);
            check_value!(
                errors,
                step.offset_ms.is_finite(),
                "Move",
                id,
                "sequence.offset_ms",
                "step '{}' has offset {}",
                step.move_id,
                step.offset_ms
            );
        }
    }

    // Validate abilities
    for (id, ability) in &registry.abilities {
        check_value!(errors, !ability.sequence.is_empty(), "Ability", id, "sequence", "no moves");
        for move_id in &ability.sequence {
            check_ref!(errors, registry.moves, "Ability", id, "sequence", "Move", move_id);
        }
        check_value!(
            errors,
            ability.sequence.is_empty() || ability.loop_from < ability.sequence.len(),
            "Ability",
            id,
            "loop_from",
            "index {} is past the {} moves",
            ability.loop_from,
            ability.sequence.len()
        );
        match ability.trigger {
            TriggerKind::Combo => check_value!(
                errors,
                ability.combo_window_ms > 0.0,
                "Ability",
                id,
                "combo_window_ms",
                "combo abilities need a positive window, got {}",
                ability.combo_window_ms
            ),
            TriggerKind::HoldRelease => check_value!(
                errors,
                ability.max_charge_ms > 0.0,
                "Ability",
                id,
                "max_charge_ms",
                "hold-release abilities need a positive charge time, got {}",
                ability.max_charge_ms
            ),
            TriggerKind::Single | TriggerKind::Defensive => {}
        }
    }

    errors
}
