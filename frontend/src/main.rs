#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

// wasm 单线程，用 lol_alloc 缩小体积
#[cfg(target_arch = "wasm32")]
#[global_allocator]
static GED_ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

fn main() {
    ged_frontend::start();
}
