mod faults;
mod fields;
mod matching;
mod paging;
