//! Component trait for UI pieces that render from props and emit actions

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and turns events into actions
///
/// - Props carry every piece of read-only data the component needs.
/// - `handle_event` returns actions; it never mutates application state.
/// - `&mut self` may hold view-local state only (cursor offset, scroll).
///
/// Focus is passed through props so components stay independent of how the
/// application tracks it.
pub trait Component<A> {
    type Props<'a>;

    /// Map an event to zero or more actions.
    ///
    /// Return `None`, `Some(action)` or a `Vec`. Render-only components keep
    /// the default.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
