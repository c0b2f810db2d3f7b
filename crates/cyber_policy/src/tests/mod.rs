mod learner;
