mod scalar;

mod option;

mod collections;

mod pair;

mod map;

mod datetime;
