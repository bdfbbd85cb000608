mod test_malformed_frames_are_isolated;
