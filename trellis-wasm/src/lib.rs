use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;

#[wasm_bindgen]
pub struct Board { pub(crate) inner: trellis::Board }

impl Board {
    pub fn rs_new() -> Board { Board { inner: trellis::Board::new() } }
    pub fn rs_geom_version(&self) -> u64 { self.inner.geom_version() }
}
