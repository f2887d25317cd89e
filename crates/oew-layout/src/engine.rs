// ABOUTME: Stateful pane resize controller driven by pointer drags.
// ABOUTME: Owns the live size vector, runs the solver per drag step, and notifies a callback.

use std::collections::HashSet;
use std::fmt;

use oew_core::{Axis, LayoutSettings, PointerPosition};
use serde::{Deserialize, Serialize};

use crate::solver::{distribute, fit, solve};
use crate::{LayoutError, Pane, PaneConstraints, PaneKey, PaneSpec, Span, SIZE_EPSILON};

/// Receives the complete size vector after every committed change
pub type ResizeCallback = Box<dyn FnMut(&[f32])>;

/// Size vector with the keys it belongs to, in layout order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResizeEvent {
    pub keys: Vec<PaneKey>,
    pub sizes: Vec<f32>,
}

/// Gesture tracking for boundary drags.
///
/// ```text
/// Idle -> Dragging -> Dragging ... -> Idle
/// ```
///
/// Every move is solved against `start_sizes`, never against the live vector.
#[derive(Debug, Clone, PartialEq, Default)]
pub(crate) enum DragState {
    #[default]
    Idle,
    Dragging {
        boundary: usize,
        start_sizes: Vec<f32>,
        start_coordinate: f32,
    },
}

/// Resizable panes laid out along one axis
pub struct PaneResize<T> {
    axis: Axis,
    extent: f32,
    handle_width: f32,
    panes: Vec<Pane<T>>,
    drag: DragState,
    on_resize: Option<ResizeCallback>,
}

impl<T: fmt::Debug> fmt::Debug for PaneResize<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaneResize")
            .field("axis", &self.axis)
            .field("extent", &self.extent)
            .field("handle_width", &self.handle_width)
            .field("panes", &self.panes)
            .field("drag", &self.drag)
            .field("has_callback", &self.on_resize.is_some())
            .finish()
    }
}

impl<T> PaneResize<T> {
    /// Lay out `specs` along `axis` with zero-width handles
    pub fn new(specs: Vec<PaneSpec<T>>, extent: f32, axis: Axis) -> Result<Self, LayoutError> {
        Self::build(specs, extent, axis, 0.0)
    }

    /// Lay out `specs` using the axis and handle width from config
    pub fn with_settings(
        specs: Vec<PaneSpec<T>>,
        extent: f32,
        settings: &LayoutSettings,
    ) -> Result<Self, LayoutError> {
        Self::build(specs, extent, settings.axis, settings.handle_width.max(0.0))
    }

    fn build(
        specs: Vec<PaneSpec<T>>,
        extent: f32,
        axis: Axis,
        handle_width: f32,
    ) -> Result<Self, LayoutError> {
        if specs.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }

        let mut seen = HashSet::new();
        let mut constraints = Vec::with_capacity(specs.len());
        let mut initial = Vec::with_capacity(specs.len());
        for spec in &specs {
            if !seen.insert(spec.key.clone()) {
                return Err(LayoutError::DuplicateKey(spec.key.clone()));
            }
            constraints.push(spec.constraints()?);
            initial.push(spec.initial_size);
        }

        check_extent(extent)?;
        let available = available_extent(extent, handle_width, specs.len());
        let sizes = seed_sizes(&initial, &constraints, available)?;

        let panes = specs
            .into_iter()
            .zip(constraints)
            .zip(sizes)
            .map(|((spec, constraints), size)| Pane {
                key: spec.key,
                content: spec.content,
                size,
                constraints,
            })
            .collect::<Vec<_>>();

        tracing::debug!(
            "Initialized {} {} panes over {}: {:?}",
            panes.len(),
            axis.label(),
            extent,
            panes.iter().map(|p| p.size).collect::<Vec<_>>()
        );

        Ok(Self {
            axis,
            extent,
            handle_width,
            panes,
            drag: DragState::Idle,
            on_resize: None,
        })
    }

    /// Install the resize callback, replacing any previous one
    pub fn on_resize(&mut self, callback: impl FnMut(&[f32]) + 'static) {
        self.on_resize = Some(Box::new(callback));
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Total extent including handles
    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn handle_width(&self) -> f32 {
        self.handle_width
    }

    /// Extent shared by the panes once handles are taken out
    pub fn available(&self) -> f32 {
        available_extent(self.extent, self.handle_width, self.panes.len())
    }

    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn panes(&self) -> &[Pane<T>] {
        &self.panes
    }

    pub fn pane(&self, key: &str) -> Option<&Pane<T>> {
        self.panes.iter().find(|p| p.key.as_str() == key)
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.panes.iter().position(|p| p.key.as_str() == key)
    }

    /// Current size vector in layout order
    pub fn sizes(&self) -> Vec<f32> {
        self.panes.iter().map(|p| p.size).collect()
    }

    pub fn size_of(&self, key: &str) -> Option<f32> {
        self.pane(key).map(|p| p.size)
    }

    pub fn constraints(&self) -> Vec<PaneConstraints> {
        self.panes.iter().map(|p| p.constraints).collect()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn active_boundary(&self) -> Option<usize> {
        match self.drag {
            DragState::Dragging { boundary, .. } => Some(boundary),
            DragState::Idle => None,
        }
    }

    /// Keys and sizes for handing to an external observer
    pub fn snapshot(&self) -> ResizeEvent {
        ResizeEvent {
            keys: self.panes.iter().map(|p| p.key.clone()).collect(),
            sizes: self.sizes(),
        }
    }

    /// Begin dragging `boundary` from `pointer`.
    ///
    /// Returns `Ok(false)` if a gesture is already active; only one boundary moves at a time.
    pub fn drag_start(
        &mut self,
        boundary: usize,
        pointer: PointerPosition,
    ) -> Result<bool, LayoutError> {
        let boundaries = self.panes.len().saturating_sub(1);
        if boundaries > 0 && boundary >= boundaries {
            return Err(LayoutError::InvalidBoundary {
                index: boundary,
                boundaries,
            });
        }
        if let Some(active) = self.active_boundary() {
            tracing::debug!("Ignoring drag on boundary {}: {} is active", boundary, active);
            return Ok(false);
        }

        let start_coordinate = self.axis.component(pointer);
        self.drag = DragState::Dragging {
            boundary,
            start_sizes: self.sizes(),
            start_coordinate,
        };
        tracing::debug!("Drag started on boundary {} at {}", boundary, start_coordinate);
        Ok(true)
    }

    /// Follow the pointer during a drag. Returns whether the sizes changed.
    pub fn drag_move(&mut self, pointer: PointerPosition) -> Result<bool, LayoutError> {
        let DragState::Dragging {
            boundary,
            start_sizes,
            start_coordinate,
        } = &self.drag
        else {
            return Ok(false);
        };

        let delta = self.axis.component(pointer) - start_coordinate;
        let next = solve(start_sizes, &self.constraints(), *boundary, delta)?;
        tracing::trace!("Drag boundary {} by {}: {:?}", boundary, delta, next);
        Ok(self.commit(next))
    }

    /// Finish the active drag, keeping the last applied sizes
    pub fn drag_end(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { boundary, .. } => {
                tracing::debug!("Drag ended on boundary {}: {:?}", boundary, self.sizes());
                true
            }
            DragState::Idle => false,
        }
    }

    /// Abandon the active drag after losing the pointer.
    ///
    /// The last applied step stays; sizes are not reverted to the gesture start.
    pub fn cancel_drag(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Dragging { boundary, .. } => {
                tracing::debug!("Drag cancelled on boundary {}: {:?}", boundary, self.sizes());
                true
            }
            DragState::Idle => false,
        }
    }

    /// Resize one pane without a gesture. Returns the size actually granted.
    ///
    /// The request is clamped to the pane's bounds, then taken from the following
    /// neighbour and, if that runs out, from the preceding one. Whatever neither can
    /// absorb is dropped from the request.
    pub fn resize_pane(&mut self, key: &str, size: f32) -> Result<f32, LayoutError> {
        let index = self
            .index_of(key)
            .ok_or_else(|| LayoutError::UnknownPane(PaneKey::from(key)))?;
        if size.is_nan() {
            return Err(LayoutError::InvalidDelta(size));
        }
        if self.cancel_drag() {
            tracing::debug!("Programmatic resize of {} ended the active drag", key);
        }

        let constraints = self.constraints();
        let current = self.sizes();
        let wanted = constraints[index].clamp(size) - current[index];
        if wanted == 0.0 {
            return Ok(current[index]);
        }

        let mut next = current.clone();
        if index + 1 < next.len() {
            next = solve(&next, &constraints, index, wanted)?;
        }
        let remaining = wanted - (next[index] - current[index]);
        if remaining != 0.0 && index > 0 {
            next = solve(&next, &constraints, index - 1, -remaining)?;
        }

        let granted = next[index];
        tracing::debug!("Resize {} to {} granted {}", key, size, granted);
        self.commit(next);
        Ok(granted)
    }

    /// Change the total extent, e.g. after the host window resized.
    ///
    /// Sizes scale proportionally and are then fitted back into their bounds.
    /// An active drag is ended first since its baseline no longer adds up.
    pub fn set_extent(&mut self, extent: f32) -> Result<bool, LayoutError> {
        check_extent(extent)?;
        let constraints = self.constraints();
        let available = available_extent(extent, self.handle_width, self.panes.len());
        check_feasible(&constraints, available)?;

        if self.cancel_drag() {
            tracing::debug!("Extent change ended the active drag");
        }

        let current_available = self.available();
        let scaled: Vec<f32> = if current_available > SIZE_EPSILON {
            let ratio = available / current_available;
            self.panes.iter().map(|p| p.size * ratio).collect()
        } else {
            vec![available / self.panes.len() as f32; self.panes.len()]
        };

        self.extent = extent;
        let next = fit(&scaled, &constraints, available);
        Ok(self.commit(next))
    }

    /// Placement of every pane along the axis
    pub fn spans(&self) -> Vec<(PaneKey, Span)> {
        let mut start = 0.0;
        self.panes
            .iter()
            .map(|pane| {
                let span = Span {
                    start,
                    len: pane.size,
                };
                start += pane.size + self.handle_width;
                (pane.key.clone(), span)
            })
            .collect()
    }

    /// Placement of the handle after pane `boundary`
    pub fn boundary_span(&self, boundary: usize) -> Option<Span> {
        if boundary + 1 >= self.panes.len() {
            return None;
        }
        let panes: f32 = self.panes[..=boundary].iter().map(|p| p.size).sum();
        Some(Span {
            start: panes + self.handle_width * boundary as f32,
            len: self.handle_width,
        })
    }

    /// Boundary whose handle lies under `coordinate`, within `tolerance` on either side
    pub fn boundary_at(&self, coordinate: f32, tolerance: f32) -> Option<usize> {
        (0..self.panes.len().saturating_sub(1))
            .filter_map(|i| self.boundary_span(i).map(|span| (i, span)))
            .filter(|(_, span)| {
                coordinate >= span.start - tolerance && coordinate <= span.end() + tolerance
            })
            .min_by(|(_, a), (_, b)| {
                let da = (coordinate - (a.start + a.len / 2.0)).abs();
                let db = (coordinate - (b.start + b.len / 2.0)).abs();
                da.total_cmp(&db)
            })
            .map(|(i, _)| i)
    }

    /// Store `next` and notify the callback if anything changed
    fn commit(&mut self, next: Vec<f32>) -> bool {
        let changed = self
            .panes
            .iter()
            .zip(&next)
            .any(|(pane, size)| pane.size != *size);
        if !changed {
            return false;
        }

        for (pane, size) in self.panes.iter_mut().zip(&next) {
            pane.size = *size;
        }
        if let Some(callback) = self.on_resize.as_mut() {
            callback(&next);
        }
        true
    }
}

fn available_extent(extent: f32, handle_width: f32, panes: usize) -> f32 {
    extent - handle_width * panes.saturating_sub(1) as f32
}

fn check_extent(extent: f32) -> Result<(), LayoutError> {
    if extent.is_finite() && extent >= 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidExtent(extent))
    }
}

fn check_feasible(constraints: &[PaneConstraints], available: f32) -> Result<(), LayoutError> {
    let required: f32 = constraints.iter().map(|c| c.min).sum();
    if required > available + SIZE_EPSILON {
        return Err(LayoutError::MinimumsExceedExtent {
            required,
            available,
        });
    }
    let allowed: f32 = constraints.iter().map(|c| c.max).sum();
    if allowed < available - SIZE_EPSILON {
        return Err(LayoutError::MaximumsBelowExtent { allowed, available });
    }
    Ok(())
}

/// Starting sizes: explicit sizes are reserved, the rest is split evenly
fn seed_sizes(
    initial: &[Option<f32>],
    constraints: &[PaneConstraints],
    available: f32,
) -> Result<Vec<f32>, LayoutError> {
    check_feasible(constraints, available)?;

    let mut sizes = vec![0.0; constraints.len()];
    let mut unsized_panes = Vec::new();
    let mut reserved = 0.0;
    for (i, (size, bounds)) in initial.iter().zip(constraints).enumerate() {
        match size {
            Some(size) => {
                sizes[i] = bounds.clamp(*size);
                reserved += sizes[i];
            }
            None => unsized_panes.push(i),
        }
    }

    if !unsized_panes.is_empty() {
        let share = ((available - reserved) / unsized_panes.len() as f32).max(0.0);
        for &i in &unsized_panes {
            sizes[i] = constraints[i].clamp(share);
        }
    }

    // Settle the remainder on unsized panes first, explicit ones only if needed
    let remaining = available - sizes.iter().sum::<f32>();
    let remaining = distribute(&mut sizes, constraints, &unsized_panes, remaining);
    let all: Vec<usize> = (0..sizes.len()).collect();
    distribute(&mut sizes, constraints, &all, remaining);
    Ok(sizes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn at(coordinate: f32) -> PointerPosition {
        PointerPosition::along(Axis::Vertical, coordinate)
    }

    fn three_panes(b_min: Option<f32>) -> PaneResize<&'static str> {
        let mut b = PaneSpec::new("b", "timeline").with_initial_size(100.0);
        b.min_size = b_min;
        PaneResize::new(
            vec![
                PaneSpec::new("a", "transport").with_initial_size(100.0),
                b,
                PaneSpec::new("c", "mixer").with_initial_size(100.0),
            ],
            300.0,
            Axis::Vertical,
        )
        .unwrap()
    }

    fn record(engine: &mut PaneResize<&'static str>) -> Rc<RefCell<Vec<Vec<f32>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.on_resize(move |sizes| sink.borrow_mut().push(sizes.to_vec()));
        events
    }

    fn assert_close(actual: &[f32], expected: &[f32]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < SIZE_EPSILON, "{actual:?} vs {expected:?}");
        }
    }

    fn assert_invariants<T>(engine: &PaneResize<T>) {
        for pane in engine.panes() {
            assert!(pane.constraints.contains(pane.size), "{} = {}", pane.key, pane.size);
        }
        let handles = engine.handle_width() * (engine.len() - 1) as f32;
        let total: f32 = engine.sizes().iter().sum::<f32>() + handles;
        assert!((total - engine.extent()).abs() < SIZE_EPSILON);
    }

    #[test]
    fn drag_then_programmatic_resize() {
        let mut engine = three_panes(None);
        let events = record(&mut engine);

        assert!(engine.drag_start(0, at(0.0)).unwrap());
        assert!(engine.drag_move(at(30.0)).unwrap());
        assert_close(&engine.sizes(), &[130.0, 70.0, 100.0]);
        assert!(engine.drag_end());

        let granted = engine.resize_pane("c", 150.0).unwrap();
        assert_eq!(granted, 150.0);
        assert_close(&engine.sizes(), &[130.0, 20.0, 150.0]);
        assert_eq!(events.borrow().len(), 2);
        assert_invariants(&engine);
    }

    #[test]
    fn programmatic_resize_stops_at_neighbour_minimum() {
        let mut engine = three_panes(Some(50.0));
        engine.drag_start(0, at(0.0)).unwrap();
        engine.drag_move(at(30.0)).unwrap();
        engine.drag_end();

        let granted = engine.resize_pane("c", 150.0).unwrap();
        assert_eq!(granted, 120.0);
        assert_close(&engine.sizes(), &[130.0, 50.0, 120.0]);
        assert_invariants(&engine);
    }

    #[test]
    fn moves_are_relative_to_gesture_start() {
        let mut engine = three_panes(None);
        let events = record(&mut engine);

        engine.drag_start(1, at(200.0)).unwrap();
        engine.drag_move(at(220.0)).unwrap();
        engine.drag_move(at(240.0)).unwrap();
        assert_close(&engine.sizes(), &[100.0, 140.0, 60.0]);

        // Same coordinate again: same vector, no extra notification
        assert!(!engine.drag_move(at(240.0)).unwrap());
        assert_close(&engine.sizes(), &[100.0, 140.0, 60.0]);
        assert_eq!(events.borrow().len(), 2);

        // Back past the start
        engine.drag_move(at(190.0)).unwrap();
        assert_close(&engine.sizes(), &[100.0, 90.0, 110.0]);
    }

    #[test]
    fn clamped_overshoot_does_not_drift() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_min_size(50.0).with_max_size(200.0),
                PaneSpec::new("b", ()).with_min_size(50.0).with_max_size(200.0),
            ],
            200.0,
            Axis::Horizontal,
        )
        .unwrap();

        engine.drag_start(0, PointerPosition::new(100.0, 0.0)).unwrap();
        engine.drag_move(PointerPosition::new(1100.0, 0.0)).unwrap();
        assert_close(&engine.sizes(), &[150.0, 50.0]);
        engine.drag_move(PointerPosition::new(5000.0, 0.0)).unwrap();
        engine.drag_move(PointerPosition::new(110.0, 0.0)).unwrap();
        assert_close(&engine.sizes(), &[110.0, 90.0]);
        assert_invariants(&engine);
    }

    #[test]
    fn second_drag_start_is_ignored() {
        let mut engine = three_panes(None);
        assert!(engine.drag_start(0, at(100.0)).unwrap());
        assert!(!engine.drag_start(1, at(200.0)).unwrap());
        assert_eq!(engine.active_boundary(), Some(0));
    }

    #[test]
    fn drag_on_missing_boundary_is_rejected() {
        let mut engine = three_panes(None);
        let err = engine.drag_start(2, at(0.0)).unwrap_err();
        assert!(matches!(err, LayoutError::InvalidBoundary { index: 2, .. }));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn next_gesture_starts_from_last_drag() {
        let mut engine = three_panes(None);
        engine.drag_start(0, at(100.0)).unwrap();
        engine.drag_move(at(120.0)).unwrap();
        engine.drag_end();

        engine.drag_start(0, at(120.0)).unwrap();
        engine.drag_move(at(130.0)).unwrap();
        assert_close(&engine.sizes(), &[130.0, 70.0, 100.0]);
    }

    #[test]
    fn cancelled_drag_keeps_last_step() {
        let mut engine = three_panes(None);
        engine.drag_start(1, at(200.0)).unwrap();
        engine.drag_move(at(170.0)).unwrap();
        assert!(engine.cancel_drag());
        assert!(!engine.is_dragging());
        assert_close(&engine.sizes(), &[100.0, 70.0, 130.0]);

        // Moves after cancellation go nowhere
        assert!(!engine.drag_move(at(100.0)).unwrap());
        assert!(!engine.cancel_drag());
    }

    #[test]
    fn single_pane_ignores_drags() {
        let mut engine =
            PaneResize::new(vec![PaneSpec::new("only", ())], 500.0, Axis::Vertical).unwrap();
        assert_eq!(engine.sizes(), vec![500.0]);

        assert!(engine.drag_start(0, at(10.0)).unwrap());
        assert!(!engine.drag_move(at(400.0)).unwrap());
        engine.drag_end();
        assert_eq!(engine.sizes(), vec![500.0]);
        assert_eq!(engine.boundary_at(250.0, 10.0), None);
    }

    #[test]
    fn unsized_panes_share_what_is_left() {
        let engine = PaneResize::new(
            vec![
                PaneSpec::new("transport", ()).with_initial_size(40.0),
                PaneSpec::new("timeline", ()),
                PaneSpec::new("browser", ()),
            ],
            400.0,
            Axis::Vertical,
        )
        .unwrap();
        assert_close(&engine.sizes(), &[40.0, 180.0, 180.0]);
    }

    #[test]
    fn unsized_share_respects_bounds() {
        let engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_max_size(100.0),
                PaneSpec::new("b", ()),
                PaneSpec::new("c", ()).with_initial_size(200.0).with_min_size(150.0),
            ],
            600.0,
            Axis::Vertical,
        )
        .unwrap();
        assert_close(&engine.sizes(), &[100.0, 300.0, 200.0]);
        assert_invariants(&engine);
    }

    #[test]
    fn explicit_sizes_are_reconciled_with_extent() {
        let engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_initial_size(100.0),
                PaneSpec::new("b", ()).with_initial_size(100.0),
            ],
            300.0,
            Axis::Vertical,
        )
        .unwrap();
        assert_close(&engine.sizes(), &[150.0, 150.0]);
    }

    #[test]
    fn handles_take_their_share() {
        let settings = LayoutSettings {
            axis: Axis::Horizontal,
            handle_width: 4.0,
            grab_tolerance: 2.0,
        };
        let engine = PaneResize::with_settings(
            vec![PaneSpec::new("a", ()), PaneSpec::new("b", ()), PaneSpec::new("c", ())],
            308.0,
            &settings,
        )
        .unwrap();
        assert_close(&engine.sizes(), &[100.0, 100.0, 100.0]);
        assert_invariants(&engine);

        let spans = engine.spans();
        assert_eq!(spans[1].1, Span { start: 104.0, len: 100.0 });
        assert_eq!(spans[2].1.start, 208.0);
        assert_eq!(engine.boundary_span(1), Some(Span { start: 204.0, len: 4.0 }));
        assert_eq!(engine.boundary_span(2), None);

        assert_eq!(engine.boundary_at(102.0, 0.0), Some(0));
        assert_eq!(engine.boundary_at(99.0, settings.grab_tolerance), Some(0));
        assert_eq!(engine.boundary_at(150.0, settings.grab_tolerance), None);
        assert_eq!(engine.boundary_at(209.0, settings.grab_tolerance), Some(1));
    }

    #[test]
    fn unsatisfiable_setups_fail_at_construction() {
        let err = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_min_size(200.0),
                PaneSpec::new("b", ()).with_min_size(150.0),
            ],
            300.0,
            Axis::Vertical,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::MinimumsExceedExtent { .. }));
        assert!(err.is_configuration());

        let err = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_max_size(100.0),
                PaneSpec::new("b", ()).with_max_size(100.0),
            ],
            300.0,
            Axis::Vertical,
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::MaximumsBelowExtent { .. }));

        let err = PaneResize::new(
            vec![PaneSpec::new("a", ()), PaneSpec::new("a", ())],
            300.0,
            Axis::Vertical,
        )
        .unwrap_err();
        assert_eq!(err, LayoutError::DuplicateKey(PaneKey::from("a")));

        let err = PaneResize::<()>::new(Vec::new(), 300.0, Axis::Vertical).unwrap_err();
        assert_eq!(err, LayoutError::EmptyLayout);
    }

    #[test]
    fn resize_pane_clamps_to_own_bounds() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("timeline", ()),
                PaneSpec::new("mixer", ()).with_min_size(100.0).with_max_size(250.0),
            ],
            600.0,
            Axis::Vertical,
        )
        .unwrap();

        assert_eq!(engine.resize_pane("mixer", 400.0).unwrap(), 250.0);
        assert_close(&engine.sizes(), &[350.0, 250.0]);
        assert_eq!(engine.resize_pane("mixer", 10.0).unwrap(), 100.0);
        assert_close(&engine.sizes(), &[500.0, 100.0]);
    }

    #[test]
    fn resize_pane_uses_following_then_preceding_neighbour() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_initial_size(100.0),
                PaneSpec::new("b", ()).with_initial_size(100.0),
                PaneSpec::new("c", ()).with_initial_size(100.0).with_min_size(80.0),
            ],
            300.0,
            Axis::Vertical,
        )
        .unwrap();

        assert_eq!(engine.resize_pane("b", 150.0).unwrap(), 150.0);
        assert_close(&engine.sizes(), &[70.0, 150.0, 80.0]);
        assert_invariants(&engine);
    }

    #[test]
    fn resize_pane_with_pinned_neighbours_grants_nothing() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_min_size(100.0),
                PaneSpec::new("b", ()).with_initial_size(100.0),
            ],
            200.0,
            Axis::Vertical,
        )
        .unwrap();
        let events = record_unit(&mut engine);

        assert_eq!(engine.resize_pane("b", 180.0).unwrap(), 100.0);
        assert_close(&engine.sizes(), &[100.0, 100.0]);
        assert!(events.borrow().is_empty());
    }

    fn record_unit(engine: &mut PaneResize<()>) -> Rc<RefCell<Vec<Vec<f32>>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        engine.on_resize(move |sizes| sink.borrow_mut().push(sizes.to_vec()));
        events
    }

    #[test]
    fn resize_unknown_pane_is_usage_error() {
        let mut engine = three_panes(None);
        let err = engine.resize_pane("inspector", 10.0).unwrap_err();
        assert_eq!(err, LayoutError::UnknownPane(PaneKey::from("inspector")));
        assert!(!err.is_configuration());
    }

    #[test]
    fn resize_pane_ends_active_drag() {
        let mut engine = three_panes(None);
        engine.drag_start(0, at(100.0)).unwrap();
        engine.drag_move(at(110.0)).unwrap();
        engine.resize_pane("c", 120.0).unwrap();
        assert!(!engine.is_dragging());
        assert_close(&engine.sizes(), &[110.0, 70.0, 120.0]);
    }

    #[test]
    fn set_extent_rescales_within_bounds() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("transport", ()).with_min_size(40.0).with_max_size(40.0),
                PaneSpec::new("timeline", ()).with_min_size(100.0),
                PaneSpec::new("mixer", ()).with_initial_size(200.0).with_min_size(150.0),
            ],
            640.0,
            Axis::Vertical,
        )
        .unwrap();
        assert_close(&engine.sizes(), &[40.0, 400.0, 200.0]);

        assert!(engine.set_extent(320.0).unwrap());
        assert_invariants(&engine);
        assert_eq!(engine.sizes()[0], 40.0);
        assert!(engine.sizes()[2] >= 150.0);

        let before = engine.sizes();
        assert!(engine.set_extent(100.0).is_err());
        assert_eq!(engine.sizes(), before);
        assert_eq!(engine.extent(), 320.0);
    }

    #[test]
    fn non_finite_extent_is_rejected() {
        let err = PaneResize::new(vec![PaneSpec::new("a", ())], f32::NAN, Axis::Vertical)
            .unwrap_err();
        assert!(matches!(err, LayoutError::InvalidExtent(_)));
        assert!(err.is_configuration());

        let mut engine = three_panes(None);
        let before = engine.sizes();
        for extent in [f32::NAN, f32::INFINITY, -10.0] {
            assert!(matches!(
                engine.set_extent(extent),
                Err(LayoutError::InvalidExtent(_))
            ));
        }
        assert_eq!(engine.sizes(), before);
        assert_eq!(engine.extent(), 300.0);
    }

    #[test]
    fn callback_sees_only_valid_vectors() {
        let mut engine = PaneResize::new(
            vec![
                PaneSpec::new("a", ()).with_min_size(30.0).with_max_size(260.0),
                PaneSpec::new("b", ()).with_min_size(60.0),
                PaneSpec::new("c", ()).with_max_size(140.0),
            ],
            360.0,
            Axis::Vertical,
        )
        .unwrap();
        let constraints = engine.constraints();
        let events = record_unit(&mut engine);

        for boundary in 0..2 {
            let origin = engine.boundary_span(boundary).unwrap().start;
            engine.drag_start(boundary, at(origin)).unwrap();
            for step in -30..=30 {
                engine.drag_move(at(origin + step as f32 * 13.0)).unwrap();
                assert_invariants(&engine);
            }
            engine.drag_end();
        }

        assert!(!events.borrow().is_empty());
        for sizes in events.borrow().iter() {
            for (size, bounds) in sizes.iter().zip(&constraints) {
                assert!(bounds.contains(*size), "{sizes:?}");
            }
            assert!((sizes.iter().sum::<f32>() - 360.0).abs() < SIZE_EPSILON);
        }
    }

    #[test]
    fn snapshot_serializes_keys_and_sizes() {
        let engine = three_panes(None);
        let json = serde_json::to_string(&engine.snapshot()).unwrap();
        assert_eq!(json, r#"{"keys":["a","b","c"],"sizes":[100.0,100.0,100.0]}"#);
    }
}
