// Host-side tests for the play/pause toggle.

use stage_core::*;

#[derive(Default)]
struct FakeContext {
    suspended: bool,
    resumes: usize,
}

impl PlaybackContext for FakeContext {
    fn is_suspended(&self) -> bool {
        self.suspended
    }
    fn resume(&mut self) {
        self.suspended = false;
        self.resumes += 1;
    }
}

#[derive(Default)]
struct FakeTransport {
    playing: bool,
    refuse: bool,
}

impl Transport for FakeTransport {
    fn play(&mut self) -> Result<(), StageError> {
        if self.refuse {
            return Err(StageError::Playback("NotAllowedError".into()));
        }
        self.playing = true;
        Ok(())
    }
    fn pause(&mut self) {
        self.playing = false;
    }
}

#[test]
fn toggle_resumes_suspended_context_before_playing() {
    let mut ctx = FakeContext {
        suspended: true,
        ..Default::default()
    };
    let mut transports = [FakeTransport::default(), FakeTransport::default()];
    let mut toggle = PlaybackToggle::new();

    assert!(toggle.toggle(&mut ctx, &mut transports));
    assert_eq!(ctx.resumes, 1);
    assert!(transports.iter().all(|t| t.playing));

    assert!(!toggle.toggle(&mut ctx, &mut transports));
    assert_eq!(ctx.resumes, 1, "running context is not resumed again");
    assert!(transports.iter().all(|t| !t.playing));
    assert!(!toggle.is_playing());
}

#[test]
fn one_refusing_input_does_not_stop_the_others() {
    let mut ctx = FakeContext::default();
    let mut transports = [
        FakeTransport {
            refuse: true,
            ..Default::default()
        },
        FakeTransport::default(),
    ];
    let mut toggle = PlaybackToggle::new();
    assert!(toggle.toggle(&mut ctx, &mut transports));
    assert!(!transports[0].playing);
    assert!(transports[1].playing);
}
