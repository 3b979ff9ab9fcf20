#[cfg(target_arch = "wasm32")]
fn main() {
    web::browser::start();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("The web layer runs in the browser; build it for wasm32-unknown-unknown.");
}
