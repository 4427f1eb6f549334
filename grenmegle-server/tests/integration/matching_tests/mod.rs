mod test_fifo_matching;
