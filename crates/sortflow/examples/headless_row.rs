//! Headless drag simulation over a row of cards.
//!
//! This example shows:
//! - Implementing `SortHost` on top of a plain `Vec`
//! - Rendering transitions with the bundled `TweenApplier`
//! - Driving a drag with synthetic pointer moves and a fixed frame step
//!
//! Run with `RUST_LOG=sortflow=trace` to see every decision.

use std::time::Duration;

use sortflow::{
    ContainerId, ContainerMutator, DragController, GeometryProvider, InsertPosition, ItemId, SortHost, SortableOptions,
    TransitionApplier, TweenApplier,
};
use sortflow_core::geometry::Rect;
use sortflow_core::math::vec2;
use sortflow_core::{logging, profiling};

const CARD_WIDTH: f32 = 120.0;
const CARD_HEIGHT: f32 = 80.0;
const FRAME: Duration = Duration::from_millis(16);

/// One horizontal row of fixed-size cards.
struct Board {
    id: ContainerId,
    cards: Vec<ItemId>,
    tweens: TweenApplier,
}

impl Board {
    fn new(names: &[&str]) -> Self {
        Self {
            id: ContainerId::new("board"),
            cards: names.iter().map(|name| ItemId::new(name)).collect(),
            tweens: TweenApplier::new(),
        }
    }

    fn card_at(&self, x: f32) -> Option<ItemId> {
        self.cards
            .iter()
            .copied()
            .find(|&card| self.measure(card, false).is_some_and(|rect| rect.contains(vec2(x, 10.0))))
    }

    fn describe(&self, names: &[&str]) -> String {
        self.cards
            .iter()
            .filter_map(|card| names.iter().find(|name| ItemId::new(name) == *card))
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl GeometryProvider for Board {
    fn measure(&self, item: ItemId, compensate_transform: bool) -> Option<Rect> {
        let index = self.cards.iter().position(|&card| card == item)?;
        let rect = Rect::new(index as f32 * CARD_WIDTH, 0.0, CARD_WIDTH, CARD_HEIGHT);
        if compensate_transform {
            Some(rect)
        } else {
            Some(rect.translate(self.tweens.offset(item)))
        }
    }

    fn measure_container(&self, _container: ContainerId) -> Option<Rect> {
        Some(Rect::new(0.0, 0.0, self.cards.len() as f32 * CARD_WIDTH, CARD_HEIGHT))
    }
}

impl ContainerMutator for Board {
    fn items(&self, container: ContainerId) -> Vec<ItemId> {
        if container == self.id { self.cards.clone() } else { Vec::new() }
    }

    fn insert(&mut self, _container: ContainerId, item: ItemId, position: InsertPosition) {
        self.cards.retain(|&card| card != item);
        let index = match position {
            InsertPosition::Before(sibling) => self.cards.iter().position(|&card| card == sibling),
            InsertPosition::AtEnd => None,
        };
        self.cards.insert(index.unwrap_or(self.cards.len()), item);
    }
}

impl SortHost for Board {
    fn transition_applier(&mut self) -> Option<&mut dyn TransitionApplier> {
        Some(&mut self.tweens)
    }
}

fn main() -> sortflow::SortResult<()> {
    logging::init();
    profiling::set_enabled(true);

    let names = ["todo", "doing", "review", "done"];
    let mut board = Board::new(&names);
    let id = board.id;
    let mut controller = DragController::new();
    controller.register(id, SortableOptions::new().swap_threshold(0.65))?;

    println!("start:   {}", board.describe(&names));

    // Grab the first card and sweep right across the row.
    let grabbed = board.cards[0];
    controller.start_drag(&board, id, grabbed, vec2(60.0, 10.0))?;
    for x in (60..=470).step_by(10) {
        let pointer = vec2(x as f32, 10.0);
        let target = board.card_at(pointer.x);
        let decision = controller.drag_over(&mut board, id, pointer, target)?;
        if !decision.is_none() {
            println!("x={x:>3}:   {}  ({decision:?})", board.describe(&names));
        }

        profiling::new_frame();
        board.tweens.update(FRAME);
        controller.tick(FRAME);
    }

    let dropped = controller.drop(&board)?;
    println!(
        "dropped: {}  (index {} -> {})",
        board.describe(&names),
        dropped.old_index,
        dropped.new_index
    );

    // Let the last transitions settle.
    while board.tweens.active_count() > 0 {
        board.tweens.update(FRAME);
        controller.tick(FRAME);
    }
    Ok(())
}
