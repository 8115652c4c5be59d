pub mod pixabay;
