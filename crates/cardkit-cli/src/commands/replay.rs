use std::fmt::Write as _;
use std::path::Path;

use serde::Serialize;
use serde_json::{Map, Value};

use cardkit_core::card::{CardEffect, CardMode, CardSession, CardSnapshot, Outcome};
use cardkit_core::CardConfig;

use crate::error::CliError;
use crate::script::{Script, Step};

/// What one input did to the card.
#[derive(Debug, Serialize)]
pub struct StepReport {
    /// 0 is the mount itself.
    pub index: usize,
    pub step: String,
    pub effects: Vec<CardEffect>,
    pub suppress_default: bool,
    pub state: CardSnapshot,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub steps: Vec<StepReport>,
}

impl ReplayReport {
    /// State after the last step.
    pub fn final_state(&self) -> Option<&CardSnapshot> {
        self.steps.last().map(|step| &step.state)
    }

    /// Every effect emitted, in order, mount included.
    pub fn all_effects(&self) -> impl Iterator<Item = &CardEffect> {
        self.steps.iter().flat_map(|step| step.effects.iter())
    }
}

pub fn run_replay(script_path: &Path, json: bool, config: CardConfig) -> Result<(), CliError> {
    let payload = std::fs::read_to_string(script_path)?;
    let script = Script::from_json_str(&payload)?;
    let report = replay(script, config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", render_text(&report));
    }
    Ok(())
}

/// Mount the script's card and feed it every step.
pub fn replay(script: Script, config: CardConfig) -> Result<ReplayReport, CliError> {
    let config = match script.config {
        Some(overrides) => apply_overrides(&config, overrides)?,
        None => config,
    };

    let (mut session, outcome) = CardSession::mount(script.card, script.collaborators, config);
    let mut steps = vec![report(0, "mount".to_string(), outcome, &session)];

    for (offset, step) in script.steps.into_iter().enumerate() {
        let index = offset + 1;
        let label = step.label();
        let outcome = apply_step(&mut session, index, step)?;
        tracing::debug!(index, step = %label, effects = outcome.effects.len(), "Replayed step");
        steps.push(report(index, label, outcome, &session));
    }

    Ok(ReplayReport { steps })
}

/// Lay the script's config fields over `base`; unset fields keep their loaded values.
fn apply_overrides(base: &CardConfig, overrides: Map<String, Value>) -> Result<CardConfig, CliError> {
    let mut merged = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut merged {
        fields.extend(overrides);
    }
    let config: CardConfig = serde_json::from_value(merged)
        .map_err(|error| CliError::Script(format!("invalid config override: {error}")))?;
    config.validate()?;
    Ok(config)
}

fn report(index: usize, step: String, outcome: Outcome, session: &CardSession) -> StepReport {
    StepReport {
        index,
        step,
        effects: outcome.effects,
        suppress_default: outcome.suppress_default,
        state: session.snapshot(),
    }
}

fn apply_step(session: &mut CardSession, index: usize, step: Step) -> Result<Outcome, CliError> {
    let outcome = match step {
        Step::BeginEdit => session.begin_edit(),
        Step::SetTitle { text } => session.set_draft_title(text),
        Step::SetDescription { text } => session.set_draft_description(text),
        Step::Commit => session.commit(),
        Step::Cancel => session.cancel(),
        Step::Confirm { accept } => session.resolve_confirmation(accept),
        Step::Key { key } => session.handle_key(key),
        Step::DoubleClick => session.double_click_body(),
        Step::ToggleMenu => session.toggle_menu(),
        Step::CloseMenu => session.close_menu(),
        Step::EscapeDocument => session.document_key(cardkit_core::card::CardKey::Escape),
        Step::PointerDown { target } => session.pointer_down(target),
        Step::Select { action } => session.select_menu_action(action),
        Step::ToggleFiles => session.toggle_attachments(),
        Step::RemoveFile { id, name } => {
            let id = match (id, name) {
                (Some(id), _) => id,
                (None, Some(name)) => session
                    .attachments()
                    .iter()
                    .find(|attachment| attachment.name == name)
                    .map(|attachment| attachment.id)
                    .ok_or_else(|| CliError::UnknownAttachment { step: index, name })?,
                (None, None) => return Err(CliError::MissingAttachmentRef(index)),
            };
            session.remove_attachment(id)
        }
        Step::AddFiles { files } => session.add_files(files),
        Step::SetFiles { attachments } => session.set_attachments(attachments),
        Step::Saving { value } => session.set_saving(value),
        Step::Sync { title, description } => session.sync_props(title, description),
    };
    Ok(outcome)
}

pub fn render_text(report: &ReplayReport) -> String {
    let mut out = String::new();
    for step in &report.steps {
        let _ = writeln!(out, "[{}] {}", step.index, step.step);
        if !step.effects.is_empty() {
            let effects: Vec<String> = step.effects.iter().map(describe_effect).collect();
            let _ = writeln!(out, "    effects: {}", effects.join(", "));
        }
        if step.suppress_default {
            let _ = writeln!(out, "    default action suppressed");
        }
        let _ = writeln!(out, "    {}", describe_state(&step.state));
    }
    out
}

fn describe_effect(effect: &CardEffect) -> String {
    match effect {
        CardEffect::Save { title, description } => format!("save({title:?}, {description:?})"),
        CardEffect::Edit => "edit".to_string(),
        CardEffect::Delete => "delete".to_string(),
        CardEffect::Duplicate => "duplicate".to_string(),
        CardEffect::Cancel => "cancel".to_string(),
        CardEffect::FilesAdded { files } => {
            let names: Vec<&str> = files.iter().map(|file| file.name.as_str()).collect();
            format!("files_added[{}]", names.join(", "))
        }
        CardEffect::FileRemove { id } => format!("file_remove({id})"),
        CardEffect::FocusTitle { delay_ms } => format!("focus_title(+{delay_ms}ms)"),
        CardEffect::BlurFields => "blur_fields".to_string(),
        CardEffect::FocusMenuTrigger => "focus_menu_trigger".to_string(),
        CardEffect::RequestConfirmation { prompt } => format!("confirm({prompt:?})"),
    }
}

fn describe_state(state: &CardSnapshot) -> String {
    let mut line = match state.mode {
        CardMode::Viewing => format!(
            "viewing title={:?} description={:?}",
            state.title, state.description
        ),
        CardMode::Editing => format!(
            "editing draft_title={:?} draft_description={:?}",
            state.draft_title, state.draft_description
        ),
    };
    let _ = write!(
        line,
        " menu={} files={}({})",
        if state.menu_open { "open" } else { "closed" },
        if state.expanded { "expanded" } else { "collapsed" },
        state.attachment_count
    );
    if state.pending_confirmation.is_some() {
        line.push_str(" awaiting-confirmation");
    }
    if state.is_saving {
        line.push_str(" saving");
    }
    line
}
