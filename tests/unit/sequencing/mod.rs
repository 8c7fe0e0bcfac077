mod distances;
mod sequencer;
