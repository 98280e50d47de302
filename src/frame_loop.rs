use std::sync::Arc;

use winit::window::Window;

/// Something that can be asked for one more display frame
pub trait FrameRequester {
    fn request_frame(&self);
}

impl FrameRequester for Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// The continuous draw loop, held as a resource.
///
/// Starting the loop requests the first frame; each finished frame requests
/// the next one while the loop is running. Cancelling, or dropping the
/// handle, stops the chain: no further frame is ever requested.
pub struct AnimationLoop<R: FrameRequester + ?Sized = Window> {
    requester: Arc<R>,
    running: bool,
    frames: u64,
}

impl<R: FrameRequester + ?Sized> AnimationLoop<R> {
    pub fn start(requester: Arc<R>) -> Self {
        log::info!("Animation loop started");
        requester.request_frame();
        Self {
            requester,
            running: true,
            frames: 0,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Record a finished frame and schedule the next if still running
    pub fn frame_finished(&mut self) {
        if !self.running {
            return;
        }
        self.frames += 1;
        self.requester.request_frame();
    }

    pub fn cancel(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Animation loop stopped after {} frames", self.frames);
        }
    }
}

impl<R: FrameRequester + ?Sized> Drop for AnimationLoop<R> {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::Cell;

    use super::FrameRequester;

    /// Counts frame requests instead of talking to a window
    #[derive(Default)]
    pub struct CountingRequester {
        pub requests: Cell<u32>,
    }

    impl FrameRequester for CountingRequester {
        fn request_frame(&self) {
            self.requests.set(self.requests.get() + 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::CountingRequester;
    use super::*;

    #[test]
    fn test_start_requests_first_frame() {
        let requester = Arc::new(CountingRequester::default());
        let animation = AnimationLoop::start(requester.clone());
        assert!(animation.is_running());
        assert_eq!(requester.requests.get(), 1);
    }

    #[test]
    fn test_each_frame_requests_the_next() {
        let requester = Arc::new(CountingRequester::default());
        let mut animation = AnimationLoop::start(requester.clone());
        for _ in 0..5 {
            animation.frame_finished();
        }
        assert_eq!(animation.frames, 5);
        assert_eq!(requester.requests.get(), 6);
    }

    #[test]
    fn test_cancel_stops_requests() {
        let requester = Arc::new(CountingRequester::default());
        let mut animation = AnimationLoop::start(requester.clone());
        animation.cancel();
        animation.frame_finished();
        animation.frame_finished();

        assert!(!animation.is_running());
        assert_eq!(requester.requests.get(), 1);
        assert_eq!(animation.frames, 0);
    }

    #[test]
    fn test_drop_releases_loop() {
        let requester = Arc::new(CountingRequester::default());
        {
            let _animation = AnimationLoop::start(requester.clone());
        }
        // Restarting after a drop begins a fresh chain
        let animation = AnimationLoop::start(requester.clone());
        assert_eq!(animation.frames, 0);
        assert_eq!(requester.requests.get(), 2);
        assert_eq!(Arc::strong_count(&requester), 2);
    }
}
