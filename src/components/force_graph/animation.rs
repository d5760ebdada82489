//! `requestAnimationFrame` loop with an explicit lifetime.
//!
//! [`AnimationLoop::start`] schedules a callback every frame until the
//! returned handle is stopped or dropped, so the host decides when the loop
//! ends instead of relying on the canvas going away.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::{debug, warn};
use wasm_bindgen::prelude::*;

struct LoopInner {
	callback: RefCell<Option<Closure<dyn FnMut()>>>,
	request_id: Cell<Option<i32>>,
	running: Cell<bool>,
}

impl LoopInner {
	fn schedule(&self) {
		let Some(window) = web_sys::window() else {
			warn!("pratejra-graph: no window, animation loop not scheduled");
			return;
		};
		if let Some(ref cb) = *self.callback.borrow() {
			match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
				Ok(id) => self.request_id.set(Some(id)),
				Err(e) => warn!("pratejra-graph: requestAnimationFrame failed: {:?}", e),
			}
		}
	}

	fn cancel(&self) {
		self.running.set(false);
		if let Some(id) = self.request_id.take() {
			if let Some(window) = web_sys::window() {
				let _ = window.cancel_animation_frame(id);
			}
		}
	}
}

/// Handle to a running animation loop. Stops the loop when dropped.
pub struct AnimationLoop {
	inner: Rc<LoopInner>,
}

impl AnimationLoop {
	/// Starts calling `on_frame` once per animation frame.
	pub fn start(mut on_frame: impl FnMut() + 'static) -> Self {
		let inner = Rc::new(LoopInner {
			callback: RefCell::new(None),
			request_id: Cell::new(None),
			running: Cell::new(true),
		});

		let weak = Rc::downgrade(&inner);
		*inner.callback.borrow_mut() = Some(Closure::new(move || {
			let Some(inner) = weak.upgrade() else {
				return;
			};
			inner.request_id.set(None);
			if !inner.running.get() {
				return;
			}
			on_frame();
			if inner.running.get() {
				inner.schedule();
			}
		}));
		inner.schedule();
		debug!("pratejra-graph: animation loop started");

		Self { inner }
	}

	/// Cancels the pending frame. The loop cannot be restarted.
	pub fn stop(&self) {
		if self.inner.running.get() {
			debug!("pratejra-graph: animation loop stopped");
		}
		self.inner.cancel();
	}
}

impl Drop for AnimationLoop {
	fn drop(&mut self) {
		self.stop();
		self.inner.callback.borrow_mut().take();
	}
}
