//! Recording canvas with click-by-click replay

use super::{Canvas, Rgb, ShapeId, ShapeKind, Start, Trigger};
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A shape as it was added
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub parent: Option<ShapeId>,
    /// Relative to the parent's origin, or absolute without a parent
    pub at: Rect,
    pub fill: Option<Rgb>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StepAction {
    Appear,
    Disappear,
    MoveTo(Point),
    CurveTo { to: Point, control: Point },
    SetText(String),
    SetFill(Rgb),
}

/// One entry of the recorded timeline.
///
/// Property changes (`SetText`, `SetFill`) carry no trigger and take effect
/// together with whatever step precedes them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub shape: ShapeId,
    pub action: StepAction,
    pub trigger: Option<Trigger>,
}

/// A shape as seen at some point of the replay
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeView {
    pub id: ShapeId,
    pub kind: ShapeKind,
    /// Absolute bounds
    pub bounds: Rect,
    pub fill: Option<Rgb>,
    pub visible: bool,
}

/// Every shape after a given number of clicks
#[derive(Debug, Clone)]
pub struct SceneState {
    pub click: usize,
    pub shapes: Vec<ShapeView>,
}

impl SceneState {
    pub fn visible(&self) -> impl Iterator<Item = &ShapeView> {
        self.shapes.iter().filter(|s| s.visible)
    }

    pub fn shape(&self, id: ShapeId) -> Option<&ShapeView> {
        self.shapes.get(id.0)
    }
}

/// The recorded document: shapes plus the ordered animation steps
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    shapes: Vec<Shape>,
    steps: Vec<Step>,
}

impl Scene {
    pub fn new() -> Self {
        Scene::default()
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.get(id.0)
    }

    /// Steps that touch `shape`, in timeline order
    pub fn steps_for(&self, shape: ShapeId) -> impl Iterator<Item = &Step> {
        self.steps.iter().filter(move |s| s.shape == shape)
    }

    /// Number of clicks needed to play the whole timeline
    pub fn clicks(&self) -> usize {
        self.click_indices().last().copied().unwrap_or(0)
    }

    /// Click on which each step plays. Steps before the first "on click"
    /// play as soon as the slide opens (click 0).
    pub fn click_indices(&self) -> Vec<usize> {
        let mut click = 0;
        self.steps
            .iter()
            .map(|step| {
                if let Some(trigger) = &step.trigger {
                    if trigger.start() == Start::OnClick {
                        click += 1;
                    }
                }
                click
            })
            .collect()
    }

    /// Whether `shape` is visible once the whole timeline has played
    pub fn is_live(&self, shape: ShapeId) -> bool {
        let mut visible = self.initially_visible(shape);
        for step in self.steps_for(shape) {
            match step.action {
                StepAction::Appear => visible = true,
                StepAction::Disappear => visible = false,
                _ => {}
            }
        }
        visible
    }

    /// A shape starts hidden when its first visibility step is an appearance
    fn initially_visible(&self, shape: ShapeId) -> bool {
        !matches!(
            self.steps_for(shape).find(|s| {
                matches!(s.action, StepAction::Appear | StepAction::Disappear)
            }),
            Some(Step {
                action: StepAction::Appear,
                ..
            })
        )
    }

    /// Replay the timeline up to and including `click`
    pub fn state_at(&self, click: usize) -> SceneState {
        let mut views: Vec<ShapeView> = self
            .shapes
            .iter()
            .map(|shape| ShapeView {
                id: shape.id,
                kind: shape.kind.clone(),
                bounds: shape.at,
                fill: shape.fill,
                visible: self.initially_visible(shape.id),
            })
            .collect();

        for (step, step_click) in self.steps.iter().zip(self.click_indices()) {
            if step_click > click {
                break;
            }
            let Some(view) = views.get_mut(step.shape.0) else {
                continue;
            };
            match &step.action {
                StepAction::Appear => view.visible = true,
                StepAction::Disappear => view.visible = false,
                StepAction::MoveTo(to) | StepAction::CurveTo { to, .. } => {
                    view.bounds.x = to.x;
                    view.bounds.y = to.y;
                }
                StepAction::SetText(text) => {
                    if let ShapeKind::Text { text: current } = &mut view.kind {
                        current.clone_from(text);
                    }
                }
                StepAction::SetFill(fill) => view.fill = Some(*fill),
            }
        }

        // Parents are always added before their children
        for i in 0..views.len() {
            if let Some(parent) = self.shapes[i].parent {
                let origin = views[parent.0].bounds.origin();
                let parent_visible = views[parent.0].visible;
                views[i].bounds = views[i].bounds.offset(origin.x, origin.y);
                views[i].visible &= parent_visible;
            }
        }

        SceneState {
            click,
            shapes: views,
        }
    }

    fn push_step(&mut self, shape: ShapeId, action: StepAction, trigger: Option<Trigger>) {
        self.steps.push(Step {
            shape,
            action,
            trigger,
        });
    }

    /// Final position of `shape`, relative to its parent
    fn final_at(&self, shape: ShapeId) -> Option<Rect> {
        let mut at = self.shapes.get(shape.0)?.at;
        for step in self.steps_for(shape) {
            if let StepAction::MoveTo(to) | StepAction::CurveTo { to, .. } = step.action {
                at.x = to.x;
                at.y = to.y;
            }
        }
        Some(at)
    }
}

impl Canvas for Scene {
    fn add_shape(&mut self, kind: ShapeKind, parent: Option<ShapeId>, at: Rect) -> ShapeId {
        let id = ShapeId(self.shapes.len());
        self.shapes.push(Shape {
            id,
            kind,
            parent,
            at,
            fill: None,
        });
        id
    }

    fn appear(&mut self, shape: ShapeId, trigger: Trigger) {
        self.push_step(shape, StepAction::Appear, Some(trigger));
    }

    fn disappear(&mut self, shape: ShapeId, trigger: Trigger) {
        self.push_step(shape, StepAction::Disappear, Some(trigger));
    }

    fn move_to(&mut self, shape: ShapeId, to: Point, trigger: Trigger) {
        self.push_step(shape, StepAction::MoveTo(to), Some(trigger));
    }

    fn curve_to(&mut self, shape: ShapeId, to: Point, control: Point, trigger: Trigger) {
        self.push_step(shape, StepAction::CurveTo { to, control }, Some(trigger));
    }

    fn set_text(&mut self, shape: ShapeId, text: &str) {
        self.push_step(shape, StepAction::SetText(text.to_string()), None);
    }

    fn set_fill(&mut self, shape: ShapeId, fill: Rgb) {
        if let Some(s) = self.shapes.get_mut(shape.0) {
            if s.fill.is_none() && !self.steps.iter().any(|step| step.shape == shape) {
                // Not on the timeline yet: plain initial property
                s.fill = Some(fill);
                return;
            }
        }
        self.push_step(shape, StepAction::SetFill(fill), None);
    }

    fn bounds(&self, shape: ShapeId) -> Option<Rect> {
        let mut bounds = self.final_at(shape)?;
        let mut parent = self.shapes.get(shape.0)?.parent;
        while let Some(p) = parent {
            let origin = self.final_at(p)?.origin();
            bounds = bounds.offset(origin.x, origin.y);
            parent = self.shapes.get(p.0)?.parent;
        }
        Some(bounds)
    }
}
