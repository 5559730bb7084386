mod test_release_stops_every_track;
