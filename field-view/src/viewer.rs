//! Interactive particle grid viewer built with eframe/egui.
//!
//! This module defines [`Viewer`], which owns a [`RenderLoop`] session and
//! implements [`eframe::App`] to feed it window input and paint each frame
//! through an [`egui::Painter`].

use eframe::App;
use field_core::{
    attractor::AttractorSource,
    config::{BodyConfig, GridConfig, Variant},
    error::GridResult,
    render_loop::{InputEvent, RenderLoop},
    surface::{Bounds, Surface},
    types::Rgb,
};
use glam::Vec2;
use rand::rng;

/// Background shown wherever the surface is cleared.
const BACKGROUND: egui::Color32 = egui::Color32::WHITE;

/// [`Surface`] over an egui painter clipped to the simulation rectangle.
///
/// Surface-local coordinates are offset by the rectangle's top-left corner.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: egui::Rect,
    fill: egui::Color32,
}

impl<'a> PainterSurface<'a> {
    /// ### Errors
    /// [`field_core::error::GridError::SurfaceUnavailable`] if `rect` has no
    /// drawable area, as happens while the window is minimized.
    pub fn new(painter: &'a egui::Painter, rect: egui::Rect) -> GridResult<Self> {
        rect_to_bounds(rect).drawable()?;
        Ok(Self {
            painter,
            rect,
            fill: egui::Color32::BLACK,
        })
    }

    fn local_rect(&self, x: f32, y: f32, w: f32, h: f32) -> egui::Rect {
        egui::Rect::from_min_size(self.rect.min + egui::vec2(x, y), egui::vec2(w, h))
    }
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.painter
            .rect_filled(self.local_rect(x, y, w, h), 0.0, BACKGROUND);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.fill = to_color32(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.painter
            .rect_filled(self.local_rect(x, y, w, h), 0.0, self.fill);
    }

    fn bounds(&self) -> Bounds {
        rect_to_bounds(self.rect)
    }
}

/// Saturating conversion of a core color into an opaque egui color.
pub fn to_color32(color: Rgb) -> egui::Color32 {
    let [r, g, b] = color.to_rgb8();
    egui::Color32::from_rgb(r, g, b)
}

pub fn rect_to_bounds(rect: egui::Rect) -> Bounds {
    Bounds::new(rect.left(), rect.top(), rect.width(), rect.height())
}

/// Maps an egui window event onto a render loop input event.
///
/// Only the primary button drags the collision body. Raw touch events are
/// dropped: egui already reports the first touch point as the pointer, and
/// further fingers must not retarget the attractor or release the body.
pub fn translate_event(event: &egui::Event) -> Option<InputEvent> {
    let to_vec = |p: egui::Pos2| Vec2::new(p.x, p.y);
    match event {
        egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove(to_vec(*pos))),
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => Some(if *pressed {
            InputEvent::PointerDown(to_vec(*pos))
        } else {
            InputEvent::PointerUp
        }),
        _ => None,
    }
}

/// Main application state for the interactive viewer.
///
/// ### Fields
/// - `session` - The running simulation and its pointer state.
/// - `rng` - Random number generator used to launch the collision body.
/// - `running` - Whether ticks advance the simulation or only repaint it.
/// - `layout` - Surface rectangle and window size last reported to the session.
/// - `last_frame_time` / `last_frame_dt` - Clock bookkeeping for the status bar.
pub struct Viewer {
    session: RenderLoop,
    rng: rand::rngs::ThreadRng,
    running: bool,
    layout: Option<(egui::Rect, egui::Vec2)>,
    last_frame_time: f64,
    last_frame_dt: f64,
}

impl Viewer {
    /// Creates a viewer running the pointer/orbit field on the default lattice.
    pub fn new() -> GridResult<Self> {
        let cfg = GridConfig::default();
        let bounds = Bounds::from_size(cfg.surface_size());
        let session = RenderLoop::new(
            cfg,
            BodyConfig::default(),
            Variant::Field,
            bounds,
            bounds.size(),
        )?;

        Ok(Self {
            session,
            rng: rng(),
            running: true,
            layout: None,
            last_frame_time: 0.0,
            last_frame_dt: 0.0,
        })
    }

    pub fn surface_size(&self) -> Vec2 {
        self.session.config().surface_size()
    }

    /// Restarts the session in `variant`, keeping the current configuration.
    fn switch_to(&mut self, variant: Variant) {
        let cfg = *self.session.config();
        let body_cfg = *self.session.body_config();
        match self.session.reconfigure(cfg, body_cfg, variant) {
            Ok(()) => {
                self.session.respawn_body(&mut self.rng);
                // Force the next frame to report the surface placement again.
                self.layout = None;
            }
            Err(e) => log::error!("failed to switch to {variant:?}: {e}"),
        }
    }

    fn reset(&mut self) {
        self.switch_to(self.session.variant());
    }

    /// Reports a moved surface or resized window to the session.
    fn sync_layout(&mut self, rect: egui::Rect, viewport: egui::Vec2) {
        if self.layout == Some((rect, viewport)) {
            return;
        }
        self.layout = Some((rect, viewport));
        self.session.handle_input(InputEvent::Resize {
            bounds: rect_to_bounds(rect),
            viewport: Vec2::new(viewport.x, viewport.y),
        });
    }

    /// Builds the top panel UI (run control, reset, scene choice).
    fn ui_top_panel(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui
                    .button(if self.running { "⏸ Pause" } else { "▶ Run" })
                    .clicked()
                {
                    self.running = !self.running;
                }

                if ui.button("Reset").clicked() {
                    self.reset();
                }

                ui.separator();
                let current = self.session.variant();
                for (variant, label) in [(Variant::Field, "Field"), (Variant::Bouncing, "Bouncing")] {
                    if ui.selectable_label(current == variant, label).clicked() && current != variant {
                        self.switch_to(variant);
                    }
                }
            });
        });
    }

    /// Builds the bottom status bar (frame delta, frame count, particle count, attractor).
    fn ui_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("dt = {:.1} ms", self.last_frame_dt));
                ui.label(format!("frame = {}", self.session.frames()));
                ui.separator();
                ui.label(format!("particles = {}", self.session.grid().len()));
                let driver = self.session.driver();
                let source = match driver.source() {
                    AttractorSource::Orbit => "orbit",
                    AttractorSource::Pointer => "pointer",
                };
                let p = driver.position();
                ui.label(format!("attractor = {source} ({:.0}, {:.0})", p.x, p.y));
            });
        });
    }

    /// Builds the central panel holding the simulation surface.
    fn ui_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let size = self.surface_size();
            let (rect, _response) =
                ui.allocate_exact_size(egui::vec2(size.x, size.y), egui::Sense::click_and_drag());
            let painter = ui.painter_at(rect);

            self.sync_layout(rect, ctx.content_rect().size());

            let events = ctx.input(|i| i.events.clone());
            for event in events.iter().filter_map(translate_event) {
                self.session.handle_input(event);
            }

            let mut surface = match PainterSurface::new(&painter, rect) {
                Ok(surface) => surface,
                Err(e) => {
                    log::warn!("skipping frame: {e}");
                    return;
                }
            };
            if self.running {
                let now = ctx.input(|i| i.time) * 1000.0;
                if self.last_frame_time > 0.0 {
                    self.last_frame_dt = now - self.last_frame_time;
                }
                self.last_frame_time = now;

                self.session.tick(&mut surface, now);
                ctx.request_repaint();
            } else {
                self.session.draw(&mut surface);
            }
        });
    }
}

impl App for Viewer {
    /// eframe callback that builds all UI panels for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ui_top_panel(ctx);
        self.ui_status_bar(ctx);
        self.ui_central_panel(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use field_core::error::GridError;

    #[test]
    fn to_color32_saturates_channels() {
        let c = to_color32(Rgb::new(-20, 256, 128));
        assert_eq!(c, egui::Color32::from_rgb(0, 255, 128));
    }

    #[test]
    fn rect_to_bounds_keeps_origin_and_size() {
        let rect = egui::Rect::from_min_size(egui::pos2(12.0, 40.0), egui::vec2(300.0, 200.0));
        assert_eq!(rect_to_bounds(rect), Bounds::new(12.0, 40.0, 300.0, 200.0));
    }

    #[test]
    fn translate_event_maps_pointer_buttons() {
        let moved = translate_event(&egui::Event::PointerMoved(egui::pos2(3.0, 4.0)));
        assert_eq!(moved, Some(InputEvent::PointerMove(Vec2::new(3.0, 4.0))));

        let pressed = translate_event(&egui::Event::PointerButton {
            pos: egui::pos2(5.0, 6.0),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        });
        assert_eq!(pressed, Some(InputEvent::PointerDown(Vec2::new(5.0, 6.0))));

        let released = translate_event(&egui::Event::PointerButton {
            pos: egui::pos2(5.0, 6.0),
            button: egui::PointerButton::Primary,
            pressed: false,
            modifiers: egui::Modifiers::NONE,
        });
        assert_eq!(released, Some(InputEvent::PointerUp));

        let secondary = translate_event(&egui::Event::PointerButton {
            pos: egui::pos2(5.0, 6.0),
            button: egui::PointerButton::Secondary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        });
        assert_eq!(secondary, None);
    }

    #[test]
    fn raw_touches_are_left_to_pointer_emulation() {
        let touch = |id, phase| egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(id),
            phase,
            pos: egui::pos2(700.0, 700.0),
            force: None,
        };

        assert_eq!(translate_event(&touch(1, egui::TouchPhase::Start)), None);
        assert_eq!(translate_event(&touch(1, egui::TouchPhase::Move)), None);
        assert_eq!(translate_event(&touch(1, egui::TouchPhase::End)), None);
        assert_eq!(translate_event(&touch(0, egui::TouchPhase::Cancel)), None);
    }

    #[test]
    fn second_finger_does_not_release_a_dragged_body() {
        let mut viewer = Viewer::new().unwrap();
        viewer.switch_to(Variant::Bouncing);
        let center = viewer.session.body().unwrap().pos;
        let press = egui::Event::PointerButton {
            pos: egui::pos2(center.x, center.y),
            button: egui::PointerButton::Primary,
            pressed: true,
            modifiers: egui::Modifiers::NONE,
        };
        let lift = egui::Event::Touch {
            device_id: egui::TouchDeviceId(0),
            id: egui::TouchId(1),
            phase: egui::TouchPhase::End,
            pos: egui::pos2(700.0, 700.0),
            force: None,
        };

        for event in [press, lift].iter().filter_map(translate_event) {
            viewer.session.handle_input(event);
        }

        assert!(viewer.session.body().unwrap().is_held());
    }

    #[test]
    fn painter_surface_requires_a_drawable_rect() {
        let ctx = egui::Context::default();
        let painter = egui::Painter::new(
            ctx,
            egui::LayerId::background(),
            egui::Rect::from_min_size(egui::Pos2::ZERO, egui::vec2(100.0, 100.0)),
        );
        let empty = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(0.0, 50.0));
        let rect = egui::Rect::from_min_size(egui::pos2(10.0, 10.0), egui::vec2(50.0, 50.0));

        assert_eq!(
            PainterSurface::new(&painter, empty).err(),
            Some(GridError::SurfaceUnavailable)
        );
        let surface = PainterSurface::new(&painter, rect).unwrap();
        assert_eq!(surface.bounds(), Bounds::new(10.0, 10.0, 50.0, 50.0));
    }

    #[test]
    fn new_viewer_runs_the_field_scene() {
        let viewer = Viewer::new().unwrap();

        assert!(viewer.running);
        assert_eq!(viewer.session.variant(), Variant::Field);
        assert_eq!(viewer.session.grid().len(), 2500);
        assert_eq!(viewer.surface_size(), Vec2::new(922.0, 922.0));
    }

    #[test]
    fn switch_to_bouncing_launches_a_body() {
        let mut viewer = Viewer::new().unwrap();
        viewer.layout = Some((egui::Rect::ZERO, egui::Vec2::ZERO));

        viewer.switch_to(Variant::Bouncing);

        assert_eq!(viewer.session.variant(), Variant::Bouncing);
        assert!(viewer.session.body().is_some());
        assert!(viewer.layout.is_none());

        viewer.reset();
        assert_eq!(viewer.session.variant(), Variant::Bouncing);
    }

    #[test]
    fn sync_layout_reports_only_changes() {
        let mut viewer = Viewer::new().unwrap();
        let rect = egui::Rect::from_min_size(egui::pos2(8.0, 30.0), egui::vec2(922.0, 922.0));

        viewer.sync_layout(rect, egui::vec2(1000.0, 1100.0));

        assert_eq!(viewer.session.driver().bounds(), rect_to_bounds(rect));
        assert_eq!(viewer.session.driver().viewport(), Vec2::new(1000.0, 1100.0));
        assert_eq!(viewer.layout, Some((rect, egui::vec2(1000.0, 1100.0))));
    }
}
