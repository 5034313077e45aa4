//! # Demo Update Hooks
//!
//! Two hooks, run in this order every tick: integrate positions, then draw.

use std::io::Write;

use maskecs_core::{EcsError, EcsResult, System, UpdateHook};

use crate::components::{Position, Sprite, Velocity};

/// Moves every entity with a position and a velocity by one fixed step.
pub struct Movement {
    /// Seconds per tick.
    pub dt: f32,
}

impl UpdateHook for Movement {
    fn run(&mut self, system: &mut System) -> EcsResult<()> {
        for id in system.query::<(Position, Velocity)>()? {
            let vel = *system.component_ref::<Velocity>(id)?;
            let pos = system.component::<Position>(id)?;
            pos.x += vel.dx * self.dt;
            pos.y += vel.dy * self.dt;
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "movement"
    }
}

/// Prints the first few drawable entities of every frame.
pub struct Draw<W: Write> {
    out: W,
    frame: u64,
    limit: usize,
}

impl<W: Write> Draw<W> {
    /// Draws at most `limit` entities per frame into `out`.
    pub fn new(out: W, limit: usize) -> Self {
        Self {
            out,
            frame: 0,
            limit,
        }
    }

    fn draw(&mut self, system: &System) -> EcsResult<std::io::Result<()>> {
        let drawable = system.query::<(Position, Sprite)>()?;
        let mut frame = Vec::with_capacity(self.limit);
        for &id in drawable.iter().take(self.limit) {
            let pos = system.component_ref::<Position>(id)?;
            let sprite = system.component_ref::<Sprite>(id)?;
            frame.push(format!(
                "  {id} sprite={} at ({:.2}, {:.2})",
                sprite.handle, pos.x, pos.y
            ));
        }

        let written = writeln!(self.out, "frame {}: {} drawable", self.frame, drawable.len())
            .and_then(|()| frame.iter().try_for_each(|line| writeln!(self.out, "{line}")));
        Ok(written)
    }
}

impl<W: Write> UpdateHook for Draw<W> {
    fn run(&mut self, system: &mut System) -> EcsResult<()> {
        self.draw(system)?.map_err(|err| EcsError::Hook {
            hook: "draw".to_owned(),
            reason: err.to_string(),
        })?;
        self.frame += 1;
        Ok(())
    }

    fn name(&self) -> &str {
        "draw"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn system() -> System {
        System::builder()
            .with_component::<Position>()
            .with_component::<Velocity>()
            .with_component::<Sprite>()
            .build()
            .unwrap()
    }

    /// Writer the test can read back after handing it to a boxed hook.
    #[derive(Clone, Default)]
    struct SharedBuf(Rc<RefCell<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.borrow_mut().write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_movement_integrates_velocity() {
        let mut system = system();
        let id = system.spawn_entity().unwrap();
        system.enable_components::<(Position, Velocity)>(id).unwrap();
        *system.component::<Velocity>(id).unwrap() = Velocity { dx: 2.0, dy: -4.0 };

        let mut movement = Movement { dt: 0.5 };
        movement.run(&mut system).unwrap();
        movement.run(&mut system).unwrap();

        assert_eq!(
            system.component_ref::<Position>(id),
            Ok(&Position { x: 2.0, y: -4.0 })
        );
    }

    #[test]
    fn test_draw_respects_limit() {
        let mut system = system();
        for handle in 0..4 {
            let id = system.spawn_entity().unwrap();
            system.enable_components::<(Position, Sprite)>(id).unwrap();
            system.component::<Sprite>(id).unwrap().handle = handle;
        }

        let buf = SharedBuf::default();
        let mut draw = Draw::new(buf.clone(), 2);
        draw.run(&mut system).unwrap();
        draw.run(&mut system).unwrap();
        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();

        assert!(text.starts_with("frame 0: 4 drawable"));
        assert!(text.contains("Entity(1) sprite=1"));
        assert!(!text.contains("Entity(2)"));
        assert!(text.contains("frame 1: 4 drawable"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_draw_reports_write_failure() {
        let mut system = system();
        system.set_update_hooks(vec![Box::new(Draw::new(BrokenPipe, 1))]);

        let err = system.update().unwrap_err();
        assert!(matches!(
            &err,
            EcsError::Hook { hook, reason } if hook == "draw" && reason.contains("closed")
        ));
    }

    #[test]
    fn test_hooks_run_in_order_through_update() {
        let mut system = system();
        let id = system.spawn_entity().unwrap();
        system
            .enable_components::<(Position, Velocity, Sprite)>(id)
            .unwrap();
        *system.component::<Velocity>(id).unwrap() = Velocity { dx: 1.0, dy: 0.0 };

        let buf = SharedBuf::default();
        system.set_update_hooks(vec![
            Box::new(Movement { dt: 1.0 }),
            Box::new(Draw::new(buf.clone(), 1)),
        ]);
        system.update().unwrap();

        // Draw sees the position movement just wrote.
        let text = String::from_utf8(buf.0.borrow().clone()).unwrap();
        assert!(text.contains("at (1.00, 0.00)"));
    }
}
