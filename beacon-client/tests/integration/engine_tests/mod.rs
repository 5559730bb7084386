mod test_candidates_queued_until_remote_description;
mod test_start_call_sends_offer;
