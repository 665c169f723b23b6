//! Particle Background
//!
//! Decorative network of drifting particles drawn behind the dashboard.
//! Particles wrap around the edges and nearby pairs are joined by lines that
//! fade with distance. Hovering "grabs" nearby particles with lines to the
//! cursor. The simulation is plain Rust; only `draw_field` and the
//! component touch the canvas.

use gloo_timers::callback::Interval;
use leptos::*;
use std::cell::Cell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Frame interval in milliseconds (~60fps)
const FRAME_MS: u32 = 16;

/// Visual and motion parameters
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleConfig {
    pub count: usize,
    pub color: &'static str,
    pub opacity: f64,
    pub radius: f64,
    /// Distance travelled per frame
    pub speed: f64,
    /// Pairs closer than this are linked
    pub link_distance: f64,
    pub link_opacity: f64,
    pub link_width: f64,
    /// Particles closer than this to the cursor are linked to it
    pub grab_distance: f64,
    pub grab_opacity: f64,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 50,
            color: "#6d28d9",
            opacity: 0.5,
            radius: 3.0,
            speed: 1.0,
            link_distance: 150.0,
            link_opacity: 0.4,
            link_width: 1.0,
            grab_distance: 100.0,
            grab_opacity: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

/// A line between two particles
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: (f64, f64),
    pub to: (f64, f64),
    pub opacity: f64,
}

/// Xorshift generator; the field only needs cheap, seedable noise
#[derive(Clone, Debug)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    /// Uniform in [0, 1)
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// The particle simulation
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: ParticleConfig,
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    /// Cursor position in canvas coordinates
    pointer: Option<(f64, f64)>,
}

impl ParticleField {
    pub fn new(config: ParticleConfig, width: f64, height: f64, seed: u64) -> Self {
        let mut rng = Rng::new(seed);
        let particles = (0..config.count)
            .map(|_| {
                let angle = rng.next_f64() * std::f64::consts::TAU;
                Particle {
                    x: rng.next_f64() * width,
                    y: rng.next_f64() * height,
                    vx: angle.cos() * config.speed,
                    vy: angle.sin() * config.speed,
                }
            })
            .collect();

        Self {
            config,
            width,
            height,
            particles,
            pointer: None,
        }
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    /// Adopt a new canvas size, pulling particles back inside it
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        for p in &mut self.particles {
            p.x = wrap(p.x, width);
            p.y = wrap(p.y, height);
        }
    }

    /// Advance one frame; particles leaving an edge re-enter on the opposite one
    pub fn step(&mut self) {
        let (width, height) = (self.width, self.height);
        for p in &mut self.particles {
            p.x = wrap(p.x + p.vx, width);
            p.y = wrap(p.y + p.vy, height);
        }
    }

    /// Track the cursor; `None` once it leaves the canvas
    pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
        self.pointer = pointer.filter(|&(x, y)| {
            (0.0..=self.width).contains(&x) && (0.0..=self.height).contains(&y)
        });
    }

    /// Lines from the cursor to every particle within the grab distance
    pub fn pointer_links(&self) -> Vec<Link> {
        let Some((px, py)) = self.pointer else {
            return Vec::new();
        };
        let max = self.config.grab_distance;

        self.particles
            .iter()
            .filter_map(|p| {
                let distance = (p.x - px).hypot(p.y - py);
                (distance < max).then(|| Link {
                    from: (p.x, p.y),
                    to: (px, py),
                    opacity: self.config.grab_opacity * (1.0 - distance / max),
                })
            })
            .collect()
    }

    /// Links between every pair closer than the link distance
    pub fn links(&self) -> Vec<Link> {
        let max = self.config.link_distance;
        let mut links = Vec::new();

        for (i, a) in self.particles.iter().enumerate() {
            for b in &self.particles[i + 1..] {
                let distance = (a.x - b.x).hypot(a.y - b.y);
                if distance < max {
                    links.push(Link {
                        from: (a.x, a.y),
                        to: (b.x, b.y),
                        opacity: self.config.link_opacity * (1.0 - distance / max),
                    });
                }
            }
        }
        links
    }
}

fn wrap(value: f64, extent: f64) -> f64 {
    if extent <= 0.0 {
        0.0
    } else {
        value.rem_euclid(extent)
    }
}

/// Full-viewport animated background
#[component]
pub fn ParticleBackground() -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();
    let mut field: Option<ParticleField> = None;
    let pointer = Rc::new(Cell::new(None::<(f64, f64)>));

    let on_move = {
        let pointer = Rc::clone(&pointer);
        window_event_listener(ev::mousemove, move |e| {
            pointer.set(Some((e.client_x() as f64, e.client_y() as f64)));
        })
    };
    let on_leave = {
        let pointer = Rc::clone(&pointer);
        window_event_listener(ev::mouseout, move |e| {
            if e.related_target().is_none() {
                pointer.set(None);
            }
        })
    };

    let interval = Interval::new(FRAME_MS, move || {
        let Some(canvas) = canvas_ref.get_untracked() else {
            return;
        };

        let (width, height) = (canvas.client_width() as u32, canvas.client_height() as u32);
        if canvas.width() != width || canvas.height() != height {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let size = (width as f64, height as f64);
        let field = field.get_or_insert_with(|| {
            ParticleField::new(
                ParticleConfig::default(),
                size.0,
                size.1,
                js_sys::Date::now() as u64,
            )
        });
        if field.size() != size {
            field.resize(size.0, size.1);
        }

        let rect = canvas.get_bounding_client_rect();
        field.set_pointer(pointer.get().map(|(x, y)| (x - rect.left(), y - rect.top())));

        field.step();
        draw_field(&canvas, field);
    });

    on_cleanup(move || {
        drop(interval);
        on_move.remove();
        on_leave.remove();
    });

    view! {
        <canvas
            node_ref=canvas_ref
            class="absolute inset-0 w-full h-full pointer-events-none"
        />
    }
}

/// Draw links then particles
fn draw_field(canvas: &HtmlCanvasElement, field: &ParticleField) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let config = field.config();
    let (width, height) = field.size();
    ctx.clear_rect(0.0, 0.0, width, height);

    ctx.set_stroke_style(&config.color.into());
    ctx.set_line_width(config.link_width);
    for link in field.links().into_iter().chain(field.pointer_links()) {
        ctx.set_global_alpha(link.opacity);
        ctx.begin_path();
        ctx.move_to(link.from.0, link.from.1);
        ctx.line_to(link.to.0, link.to.1);
        ctx.stroke();
    }

    ctx.set_global_alpha(config.opacity);
    ctx.set_fill_style(&config.color.into());
    for p in field.particles() {
        ctx.begin_path();
        let _ = ctx.arc(p.x, p.y, config.radius, 0.0, std::f64::consts::TAU);
        ctx.fill();
    }
    ctx.set_global_alpha(1.0);
}
