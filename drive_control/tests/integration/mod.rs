mod closed_loop;
mod pole_placement;
mod transfer_function;
