use folio::config;
use folio::gallery::Gallery;
use folio::sys::feed::FrameFeed;
use folio::sys::runtime;

fn main() {
    env_logger::init();

    match config::write_default_config() {
        Ok(path) => log::debug!("Using config at {}", path.display()),
        Err(e) => log::warn!("Could not write default config: {}", e),
    }
    let config = config::load_or_default();

    let mut gallery = Gallery::new(config.clone());
    gallery.load_content();

    let feed = FrameFeed::default();
    feed.publish(gallery.snapshot());

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, feed.clone(), &config);

    // Single writer: every event is applied here, in arrival order.
    while let Ok(event) = rx.recv_blocking() {
        if gallery.update(event) {
            feed.publish(gallery.snapshot());
        }
    }
}
