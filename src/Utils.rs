//! different utility modules used throughout the project
/// rounding of numbers and assembling of the headline answer line
pub mod formatter;
/// bounded newest-first list of solved equations
pub mod history;
/// logger initialisation and saving of plot samples into file
pub mod logger;
/// tiny module to plot the sampled parabola
pub mod plots;
/// parse document with structure like " title1 key1: value1, value2 key2: value2 title2 key3:value3, value4" into HashMap
pub mod task_parser;
