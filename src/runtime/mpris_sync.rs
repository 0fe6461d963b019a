use crate::mpris::{MprisHandle, PlaybackStatus};
use crate::player::{Controller, PlaybackEngine, View};

pub fn update_mpris<E: PlaybackEngine, V: View>(
    mpris: &MprisHandle,
    controller: &Controller<E, V>,
    playback: PlaybackStatus,
) {
    mpris.set_title(controller.current_name());
    mpris.set_playback(playback);
}
