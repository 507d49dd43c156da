#[cfg(test)]
pub mod common;



#[cfg(test)]
mod test_damage_moves;


#[cfg(test)]
mod test_status_application;


#[cfg(test)]
mod test_end_of_turn;
