//! Plain-text rendering of the match for the console.
use std::fmt::Write;

use battle_core::{SkillCatalog, SkillCategory, SkillEffect};
use client_frontend_core::format::seconds;
use client_frontend_core::{ActorPanel, BattleViewModel, MessageLog};

pub const HELP: &str = "\
commands:
  cast <red|blue> <skill>   cast a skill (alias: c)
  skills [category]         list skills, optionally attack, defense or recovery
  status                    show health, energy, locks and recent messages (alias: s)
  reset                     start a new match
  help                      show this help (alias: h)
  quit                      leave (alias: q)";

/// Status block followed by the newest `message_limit` messages, oldest first.
pub fn render_status(
    model: &BattleViewModel,
    messages: &MessageLog,
    message_limit: usize,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "== {} | {} ==", seconds(model.now), model.headline());
    for panel in &model.actors {
        let _ = writeln!(out, "{}", render_panel(panel));
    }
    if model.pending_effects > 0 {
        let _ = writeln!(out, "pending effects: {}", model.pending_effects);
    }

    let mut recent: Vec<_> = messages.recent(message_limit).collect();
    recent.reverse();
    for entry in recent {
        match entry.timestamp {
            Some(at) => {
                let _ = writeln!(out, "  [{}] {}", seconds(at), entry.text);
            }
            None => {
                let _ = writeln!(out, "  {}", entry.text);
            }
        }
    }

    out.trim_end().to_string()
}

fn render_panel(panel: &ActorPanel) -> String {
    let lock = match panel.lock_seconds {
        Some(secs) => format!("locked {secs}s"),
        None => "ready".to_string(),
    };
    let mut line = format!(
        "{:<5} HP {:>3}/{:<3} ({:>3}%)  EN {:>3}/{:<3} ({:>3}%)  {}",
        panel.id.to_string(),
        panel.health,
        panel.max_health,
        panel.health_percent,
        panel.energy,
        panel.max_energy,
        panel.energy_percent,
        lock
    );
    if !panel.buffs.is_empty() {
        let _ = write!(line, "  [{}]", panel.buffs.join(" "));
    }
    line
}

/// Catalog listing in catalog order, optionally filtered by category.
pub fn render_skills(catalog: &SkillCatalog, category: Option<SkillCategory>) -> String {
    let mut out = String::new();
    let skills = catalog
        .iter()
        .filter(|skill| category.is_none_or(|category| skill.category == category));

    for skill in skills {
        let _ = writeln!(
            out,
            "  {:<14} {:<9} {:>3} energy  cd {:>5}  {}",
            skill.id.to_string(),
            skill.category.to_string(),
            skill.energy_cost,
            seconds(skill.cooldown),
            describe_effect(&skill.effect)
        );
    }

    if out.is_empty() {
        "no skills".to_string()
    } else {
        out.trim_end().to_string()
    }
}

fn describe_effect(effect: &SkillEffect) -> String {
    match effect {
        SkillEffect::Damage { amount, travel } => {
            format!("{amount} damage after {}", seconds(*travel))
        }
        SkillEffect::Guard { buff, duration } => format!("{buff} for {}", seconds(*duration)),
        SkillEffect::Heal { amount, delay } => {
            format!("+{amount} health after {}", seconds(*delay))
        }
        SkillEffect::HealOverTime {
            per_pulse,
            pulses,
            interval,
        } => format!("+{per_pulse} health x{pulses} every {}", seconds(*interval)),
        SkillEffect::RestoreEnergy { amount, delay } => {
            format!("+{amount} energy after {}", seconds(*delay))
        }
        SkillEffect::Revive { delay } => format!("full health after {}", seconds(*delay)),
        SkillEffect::Cleanse { delay } => format!("cleanse after {}", seconds(*delay)),
    }
}
