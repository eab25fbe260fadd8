mod bookings_test;
mod middleware_test;
mod notify_test;
mod rooms_test;
