//! Branching dialogue runner.
//!
//! Scripts are read-only content served by a [`DialogueOracle`]. The only
//! mutable piece is the [`DialogueCursor`] stored on [`GameState`]; while it
//! is set the simulation is paused and the interact input advances it.

use std::collections::BTreeMap;
use std::fmt;

use crate::action::ActionTransition;
use crate::cue::{Cue, CueBuffer};
use crate::env::{GameEnv, ItemKindId};
use crate::error::{ErrorSeverity, GameError};
use crate::state::GameState;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct DialogueId(pub String);

impl From<&str> for DialogueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for DialogueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueChoice {
    pub text: String,
    /// Script to jump to. `None` continues with the next line.
    #[cfg_attr(feature = "serde", serde(default))]
    pub next: Option<DialogueId>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueLine {
    pub speaker: String,
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub choices: Vec<DialogueChoice>,
}

impl DialogueLine {
    pub fn new(speaker: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            text: text.into(),
            choices: Vec::new(),
        }
    }

    pub fn with_choice(mut self, text: impl Into<String>, next: Option<DialogueId>) -> Self {
        self.choices.push(DialogueChoice {
            text: text.into(),
            next,
        });
        self
    }
}

/// World facts a script can require before it starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogueCondition {
    LanternLit(u32),
    HasItem(ItemKindId),
}

impl DialogueCondition {
    pub fn is_met(&self, state: &GameState) -> bool {
        match *self {
            Self::LanternLit(lantern_id) => state.is_lantern_lit(lantern_id),
            Self::HasItem(kind) => state.inventory.contains(kind),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueScript {
    pub id: DialogueId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    pub lines: Vec<DialogueLine>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub conditions: Vec<DialogueCondition>,
}

impl DialogueScript {
    pub fn new(id: impl Into<String>, lines: Vec<DialogueLine>) -> Self {
        Self {
            id: DialogueId(id.into()),
            title: String::new(),
            lines,
            conditions: Vec::new(),
        }
    }

    pub fn with_condition(mut self, condition: DialogueCondition) -> Self {
        self.conditions.push(condition);
        self
    }
}

pub trait DialogueOracle: Send + Sync {
    fn script(&self, id: &DialogueId) -> Option<&DialogueScript>;
}

/// Scripts keyed by id.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DialogueLibrary {
    scripts: BTreeMap<DialogueId, DialogueScript>,
}

impl DialogueLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_scripts(scripts: impl IntoIterator<Item = DialogueScript>) -> Self {
        let mut library = Self::new();
        for script in scripts {
            library.insert(script);
        }
        library
    }

    pub fn insert(&mut self, script: DialogueScript) -> Option<DialogueScript> {
        self.scripts.insert(script.id.clone(), script)
    }

    pub fn get(&self, id: &DialogueId) -> Option<&DialogueScript> {
        self.scripts.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DialogueScript> {
        self.scripts.values()
    }

    pub fn len(&self) -> usize {
        self.scripts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scripts.is_empty()
    }
}

impl DialogueOracle for DialogueLibrary {
    fn script(&self, id: &DialogueId) -> Option<&DialogueScript> {
        self.get(id)
    }
}

/// Position inside the active script.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DialogueCursor {
    pub script: DialogueId,
    pub line: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogueError {
    #[error("dialogue '{0}' does not exist")]
    UnknownScript(DialogueId),

    #[error("dialogue '{0}' has no lines")]
    EmptyScript(DialogueId),

    #[error("conditions for dialogue '{0}' are not met")]
    ConditionsUnmet(DialogueId),

    #[error("no dialogue is active")]
    NotActive,

    #[error("the current line is waiting for a choice")]
    AwaitingChoice,

    #[error("the current line offers no choices")]
    NoChoices,

    #[error("choice {index} is out of range ({available} available)")]
    InvalidChoice { index: usize, available: usize },
}

impl GameError for DialogueError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::UnknownScript(_) | Self::EmptyScript(_) => ErrorSeverity::Internal,
            Self::ConditionsUnmet(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownScript(_) => "DIALOGUE_UNKNOWN_SCRIPT",
            Self::EmptyScript(_) => "DIALOGUE_EMPTY_SCRIPT",
            Self::ConditionsUnmet(_) => "DIALOGUE_CONDITIONS_UNMET",
            Self::NotActive => "DIALOGUE_NOT_ACTIVE",
            Self::AwaitingChoice => "DIALOGUE_AWAITING_CHOICE",
            Self::NoChoices => "DIALOGUE_NO_CHOICES",
            Self::InvalidChoice { .. } => "DIALOGUE_INVALID_CHOICE",
        }
    }
}

/// Where the dialogue stands after an operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DialogueProgress {
    Line { script: DialogueId, line: usize },
    Ended,
}

/// Looks up the script and checks it can start.
fn resolve<'o, O>(
    state: &GameState,
    oracle: &'o O,
    id: &DialogueId,
) -> Result<&'o DialogueScript, DialogueError>
where
    O: DialogueOracle + ?Sized,
{
    let script = oracle
        .script(id)
        .ok_or_else(|| DialogueError::UnknownScript(id.clone()))?;
    if script.lines.is_empty() {
        return Err(DialogueError::EmptyScript(id.clone()));
    }
    if !script.conditions.iter().all(|c| c.is_met(state)) {
        return Err(DialogueError::ConditionsUnmet(id.clone()));
    }
    Ok(script)
}

fn show_line(
    state: &mut GameState,
    script: &DialogueScript,
    line: usize,
    cues: &mut CueBuffer,
) -> DialogueProgress {
    if let Some(current) = script.lines.get(line) {
        cues.push(Cue::DialogueLine {
            dialogue: script.id.clone(),
            speaker: current.speaker.clone(),
            text: current.text.clone(),
            choices: current.choices.iter().map(|c| c.text.clone()).collect(),
        });
        state.dialogue = Some(DialogueCursor {
            script: script.id.clone(),
            line,
        });
        DialogueProgress::Line {
            script: script.id.clone(),
            line,
        }
    } else {
        state.dialogue = None;
        cues.push(Cue::DialogueEnded);
        DialogueProgress::Ended
    }
}

/// The line on screen, if a dialogue is running.
pub fn current_line<'o, O>(state: &GameState, oracle: &'o O) -> Option<&'o DialogueLine>
where
    O: DialogueOracle + ?Sized,
{
    let cursor = state.dialogue.as_ref()?;
    oracle.script(&cursor.script)?.lines.get(cursor.line)
}

/// Starts `id` from its first line, replacing any active dialogue.
pub fn start<O>(
    state: &mut GameState,
    oracle: &O,
    id: &DialogueId,
    cues: &mut CueBuffer,
) -> Result<DialogueProgress, DialogueError>
where
    O: DialogueOracle + ?Sized,
{
    let script = resolve(state, oracle, id)?;
    Ok(show_line(state, script, 0, cues))
}

fn active<'o, O>(
    state: &GameState,
    oracle: &'o O,
) -> Result<(&'o DialogueScript, usize), DialogueError>
where
    O: DialogueOracle + ?Sized,
{
    let cursor = state.dialogue.as_ref().ok_or(DialogueError::NotActive)?;
    let script = oracle
        .script(&cursor.script)
        .ok_or_else(|| DialogueError::UnknownScript(cursor.script.clone()))?;
    Ok((script, cursor.line))
}

/// Moves to the next line, ending the dialogue after the last one.
pub fn advance<O>(
    state: &mut GameState,
    oracle: &O,
    cues: &mut CueBuffer,
) -> Result<DialogueProgress, DialogueError>
where
    O: DialogueOracle + ?Sized,
{
    let (script, line) = active(state, oracle)?;
    if script
        .lines
        .get(line)
        .is_some_and(|current| !current.choices.is_empty())
    {
        return Err(DialogueError::AwaitingChoice);
    }
    Ok(show_line(state, script, line + 1, cues))
}

/// Picks a choice on the current line: jumps to its target script or
/// continues with the next line.
pub fn choose<O>(
    state: &mut GameState,
    oracle: &O,
    index: usize,
    cues: &mut CueBuffer,
) -> Result<DialogueProgress, DialogueError>
where
    O: DialogueOracle + ?Sized,
{
    let (script, line) = active(state, oracle)?;
    let choices = script
        .lines
        .get(line)
        .map(|current| current.choices.as_slice())
        .unwrap_or_default();
    if choices.is_empty() {
        return Err(DialogueError::NoChoices);
    }
    let choice = choices.get(index).ok_or(DialogueError::InvalidChoice {
        index,
        available: choices.len(),
    })?;
    match &choice.next {
        Some(next) => {
            let target = resolve(state, oracle, next)?;
            Ok(show_line(state, target, 0, cues))
        }
        None => Ok(show_line(state, script, line + 1, cues)),
    }
}

/// Player input while a dialogue is on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DialogueAction {
    Advance,
    Choose(usize),
}

impl DialogueAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Advance => "dialogue_advance",
            Self::Choose(_) => "dialogue_choose",
        }
    }
}

impl ActionTransition for DialogueAction {
    type Error = DialogueError;
    type Output = DialogueProgress;

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        if state.dialogue.is_none() {
            return Err(DialogueError::NotActive);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        env: &GameEnv<'_>,
        cues: &mut CueBuffer,
    ) -> Result<Self::Output, Self::Error> {
        match *self {
            Self::Advance => advance(state, env.dialogue(), cues),
            Self::Choose(index) => choose(state, env.dialogue(), index, cues),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AddPolicy, GameConfig};
    use crate::env::ItemCatalog;
    use crate::inventory::ItemStack;
    use crate::state::PropKind;
    use glam::Vec3;

    fn library() -> DialogueLibrary {
        DialogueLibrary::from_scripts([
            DialogueScript::new(
                "elder",
                vec![
                    DialogueLine::new("Elder", "The forest is restless."),
                    DialogueLine::new("Elder", "Will you help?")
                        .with_choice("Yes", Some(DialogueId::from("quest")))
                        .with_choice("Not now", None),
                    DialogueLine::new("Elder", "Come back when you are ready."),
                ],
            ),
            DialogueScript::new(
                "quest",
                vec![DialogueLine::new("Elder", "Light the old lantern.")],
            ),
            DialogueScript::new(
                "after_lantern",
                vec![DialogueLine::new("Elder", "The path is clear.")],
            )
            .with_condition(DialogueCondition::LanternLit(1)),
        ])
    }

    fn state() -> GameState {
        GameState::new(&GameConfig::default(), Vec3::ZERO)
    }

    #[test]
    fn advance_walks_lines_and_ends() {
        let library = DialogueLibrary::from_scripts([DialogueScript::new(
            "short",
            vec![DialogueLine::new("A", "one"), DialogueLine::new("B", "two")],
        )]);
        let mut state = state();
        let mut cues = CueBuffer::new();

        start(&mut state, &library, &DialogueId::from("short"), &mut cues).unwrap();
        assert!(state.is_paused());
        assert_eq!(
            current_line(&state, &library).map(|l| l.text.as_str()),
            Some("one")
        );

        advance(&mut state, &library, &mut cues).unwrap();
        assert_eq!(state.dialogue.as_ref().map(|c| c.line), Some(1));
        assert_eq!(
            advance(&mut state, &library, &mut cues),
            Ok(DialogueProgress::Ended)
        );
        assert!(!state.is_paused());
        assert!(cues.contains(&Cue::DialogueEnded));
        assert_eq!(
            advance(&mut state, &library, &mut cues),
            Err(DialogueError::NotActive)
        );
    }

    #[test]
    fn choices_jump_between_scripts() {
        let library = library();
        let mut state = state();
        let mut cues = CueBuffer::new();
        start(&mut state, &library, &DialogueId::from("elder"), &mut cues).unwrap();
        advance(&mut state, &library, &mut cues).unwrap();

        assert_eq!(
            advance(&mut state, &library, &mut cues),
            Err(DialogueError::AwaitingChoice)
        );
        assert_eq!(
            choose(&mut state, &library, 5, &mut cues),
            Err(DialogueError::InvalidChoice {
                index: 5,
                available: 2
            })
        );

        let progress = choose(&mut state, &library, 0, &mut cues).unwrap();
        assert_eq!(
            progress,
            DialogueProgress::Line {
                script: DialogueId::from("quest"),
                line: 0
            }
        );
        assert_eq!(
            choose(&mut state, &library, 0, &mut cues),
            Err(DialogueError::NoChoices)
        );
    }

    #[test]
    fn choice_without_target_continues_the_script() {
        let library = library();
        let mut state = state();
        let mut cues = CueBuffer::new();
        start(&mut state, &library, &DialogueId::from("elder"), &mut cues).unwrap();
        advance(&mut state, &library, &mut cues).unwrap();

        let progress = choose(&mut state, &library, 1, &mut cues).unwrap();
        assert_eq!(
            progress,
            DialogueProgress::Line {
                script: DialogueId::from("elder"),
                line: 2
            }
        );
    }

    #[test]
    fn start_checks_conditions() {
        let library = library();
        let mut state = state();
        let mut cues = CueBuffer::new();
        let id = DialogueId::from("after_lantern");

        assert_eq!(
            start(&mut state, &library, &id, &mut cues),
            Err(DialogueError::ConditionsUnmet(id.clone()))
        );
        assert!(cues.is_empty());

        state.spawn_prop(
            PropKind::Lantern {
                lantern_id: 1,
                lit: true,
                save_point: false,
            },
            Vec3::X,
        );
        assert!(start(&mut state, &library, &id, &mut cues).is_ok());
        assert_eq!(
            start(&mut state, &library, &DialogueId::from("missing"), &mut cues),
            Err(DialogueError::UnknownScript(DialogueId::from("missing")))
        );
    }

    #[test]
    fn has_item_condition_sees_inventory() {
        let items = ItemCatalog::starter();
        let mut state = state();
        let condition = DialogueCondition::HasItem(ItemCatalog::HEALING_BERRY);
        assert!(!condition.is_met(&state));
        state
            .inventory
            .add_item(
                &items,
                ItemStack::new(ItemCatalog::HEALING_BERRY, 1),
                AddPolicy::Spill,
            )
            .unwrap();
        assert!(condition.is_met(&state));
    }

    #[test]
    fn empty_script_cannot_start() {
        let library = DialogueLibrary::from_scripts([DialogueScript::new("blank", vec![])]);
        let mut state = state();
        assert_eq!(
            start(
                &mut state,
                &library,
                &DialogueId::from("blank"),
                &mut CueBuffer::new()
            ),
            Err(DialogueError::EmptyScript(DialogueId::from("blank")))
        );
        assert!(!state.is_paused());
    }
}
