use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, Window};

use super::render;
use super::state::GraphState;
use super::surface::DrawSurface;
use super::types::{GraphData, VisualizationSettings};

/// Canvas backend for the draw-call abstraction: a thin delegation onto
/// `CanvasRenderingContext2d`. Coordinates are logical pixels; the context
/// is pre-scaled by the device pixel ratio.
struct CanvasSurface {
	ctx: CanvasRenderingContext2d,
	width: f64,
	height: f64,
}

impl DrawSurface for CanvasSurface {
	fn width(&self) -> f64 {
		self.width
	}

	fn height(&self) -> f64 {
		self.height
	}

	fn set_fill_color(&mut self, color: &str) {
		self.ctx.set_fill_style_str(color);
	}

	fn set_stroke_color(&mut self, color: &str) {
		self.ctx.set_stroke_style_str(color);
	}

	fn set_line_width(&mut self, width: f64) {
		self.ctx.set_line_width(width);
	}

	fn set_line_dash(&mut self, segments: &[f64]) {
		let array = js_sys::Array::new();
		for segment in segments {
			array.push(&JsValue::from_f64(*segment));
		}
		let _ = self.ctx.set_line_dash(&array);
	}

	fn set_global_alpha(&mut self, alpha: f64) {
		self.ctx.set_global_alpha(alpha);
	}

	fn set_shadow(&mut self, color: &str, blur: f64) {
		self.ctx.set_shadow_color(color);
		self.ctx.set_shadow_blur(blur);
	}

	fn clear_shadow(&mut self) {
		self.ctx.set_shadow_color("rgba(0, 0, 0, 0)");
		self.ctx.set_shadow_blur(0.0);
	}

	fn set_font(&mut self, font: &str) {
		self.ctx.set_font(font);
	}

	fn set_text_align(&mut self, align: &str) {
		self.ctx.set_text_align(align);
	}

	fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ctx.fill_rect(x, y, width, height);
	}

	fn stroke_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
		self.ctx.stroke_rect(x, y, width, height);
	}

	fn begin_path(&mut self) {
		self.ctx.begin_path();
	}

	fn move_to(&mut self, x: f64, y: f64) {
		self.ctx.move_to(x, y);
	}

	fn line_to(&mut self, x: f64, y: f64) {
		self.ctx.line_to(x, y);
	}

	fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
		self.ctx.quadratic_curve_to(cx, cy, x, y);
	}

	fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
		let _ = self.ctx.arc(x, y, radius, start_angle, end_angle);
	}

	fn close_path(&mut self) {
		self.ctx.close_path();
	}

	fn fill(&mut self) {
		self.ctx.fill();
	}

	fn stroke(&mut self) {
		self.ctx.stroke();
	}

	fn fill_text(&mut self, text: &str, x: f64, y: f64) {
		let _ = self.ctx.fill_text(text, x, y);
	}
}

fn measure(
	canvas: &HtmlCanvasElement,
	window: &Window,
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
) -> (f64, f64) {
	if fullscreen {
		(
			window
				.inner_width()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(800.0),
			window
				.inner_height()
				.ok()
				.and_then(|v| v.as_f64())
				.unwrap_or(600.0),
		)
	} else {
		(
			width.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_width() as f64)
					.unwrap_or(800.0)
			}),
			height.unwrap_or_else(|| {
				canvas
					.parent_element()
					.map(|p| p.client_height() as f64)
					.unwrap_or(600.0)
			}),
		)
	}
}

/// Keep the backing store at device resolution while the element renders at
/// logical size.
fn size_canvas(canvas: &HtmlCanvasElement, width: f64, height: f64, dpr: f64) {
	canvas.set_width((width * dpr) as u32);
	canvas.set_height((height * dpr) as u32);
	let style = canvas.style();
	let _ = style.set_property("width", &format!("{width}px"));
	let _ = style.set_property("height", &format!("{height}px"));
}

/// Canvas view over the relationship graph: lays out the supplied assets,
/// repaints every animation frame, and resolves clicks to selections.
#[component]
pub fn RelationshipGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into)] settings: Signal<VisualizationSettings>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
	#[prop(optional, into)] on_select: Option<Callback<Option<String>>>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<GraphState>>> = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let resize_cb: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let (state_init, animate_init, resize_cb_init) =
		(state.clone(), animate.clone(), resize_cb.clone());

	// Mount: acquire the context, build the first state, start the loop.
	Effect::new(move |_| {
		if state_init.borrow().is_some() {
			return;
		}
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			return;
		};

		let (w, h) = measure(&canvas, &window, fullscreen, width, height);
		let dpr = window.device_pixel_ratio();
		size_canvas(&canvas, w, h, dpr);

		// Context acquisition failure short-circuits; there is nothing to
		// draw into and the next mount is the retry.
		let Ok(Some(context)) = canvas.get_context("2d") else {
			log::warn!("2d context unavailable, skipping graph mount");
			return;
		};
		let Ok(ctx) = context.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};
		let _ = ctx.scale(dpr, dpr);

		let bundle = data.get_untracked();
		*state_init.borrow_mut() = Some(GraphState::new(
			bundle.assets,
			bundle.relationships,
			bundle.clusters,
			bundle.patterns,
			settings.get_untracked(),
			w,
			h,
			js_sys::Date::now() as u64,
		));

		let (state_resize, canvas_resize, ctx_resize) =
			(state_init.clone(), canvas.clone(), ctx.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(win) = web_sys::window() else {
				return;
			};
			let (nw, nh) = measure(&canvas_resize, &win, fullscreen, width, height);
			let dpr = win.device_pixel_ratio();
			size_canvas(&canvas_resize, nw, nh, dpr);
			// Resizing the backing store resets the context transform.
			let _ = ctx_resize.scale(dpr, dpr);
			if let Some(ref mut s) = *state_resize.borrow_mut() {
				s.resize(nw, nh);
			}
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (state_anim, animate_inner) = (state_init.clone(), animate_init.clone());
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if let Some(ref s) = *state_anim.borrow() {
				let mut surface = CanvasSurface {
					ctx: ctx.clone(),
					width: s.width,
					height: s.height,
				};
				render::render(s, &mut surface);
			}
			if let Some(ref cb) = *animate_inner.borrow() {
				if let Some(win) = web_sys::window() {
					let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}
		}));
		if let Some(ref cb) = *animate_init.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	// Data or settings changed: discard the node array and lay out fresh.
	let state_update = state.clone();
	Effect::new(move |_| {
		let bundle = data.get();
		let config = settings.get();
		if let Some(ref mut s) = *state_update.borrow_mut() {
			let (w, h) = (s.width, s.height);
			*s = GraphState::new(
				bundle.assets,
				bundle.relationships,
				bundle.clusters,
				bundle.patterns,
				config,
				w,
				h,
				js_sys::Date::now() as u64,
			);
		}
	});

	let state_click = state.clone();
	let on_click = move |ev: MouseEvent| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut s) = *state_click.borrow_mut() {
			let selected = s.handle_click(x, y);
			if let Some(cb) = on_select {
				cb.run(selected);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="relationship-graph-canvas"
			on:click=on_click
			style="display: block; cursor: pointer;"
		/>
	}
}
